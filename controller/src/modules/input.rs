/// ----- INPUT MODULE -----
/// Reads operator commands line by line on its own thread and hands them
/// to the main loop already parsed. End of input is reported as `quit`.

use std::io::BufRead;
use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use tracing::warn;

use shared_resources::error::CommandError;

use crate::utilities::command::Command;

pub fn init<R: BufRead + Send + 'static>(input: R) -> std::io::Result<Receiver<Result<Command, CommandError>>> {
    let (command_tx, command_rx) = unbounded();

    thread::Builder::new().name("command_input".to_string()).spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("could not read command: {}", e);
                    break;
                },
            };
            if command_tx.send(Command::parse(&line)).is_err() {
                return;
            }
        }
        let _ = command_tx.send(Ok(Command::Quit));
    })?;

    Ok(command_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use shared_resources::direction::Direction;

    #[test]
    fn forwards_parsed_lines_and_quits_at_end() {
        let input = Cursor::new("status\nrequest 5 up\nfly\n");
        let command_rx = init(input).unwrap();
        let commands: Vec<Result<Command, CommandError>> = command_rx.iter().collect();

        assert_eq!(commands, vec![
            Ok(Command::Status),
            Ok(Command::Request { floor: 5, direction: Direction::Up }),
            Err(CommandError::UnknownCommand(String::from("fly"))),
            Ok(Command::Quit),
        ]);
    }
}
