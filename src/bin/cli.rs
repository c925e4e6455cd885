use std::process::ExitCode;

fn main() -> ExitCode {
    azhealth_ui_terminal::run()
}
