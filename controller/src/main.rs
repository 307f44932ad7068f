use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    controller::modules::run()
}
