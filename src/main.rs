use svg2cairoxml::cli::{self, Action};
use svg2cairoxml::{convert_log, Converter, Session};

fn run(action: Action) -> i32 {
    match action {
        Action::Usage => {
            println!("{}", cli::usage());
            0
        }

        Action::Version => {
            cli::print_version();
            0
        }

        Action::Convert {
            input,
            output,
            ignored,
        } => {
            let session = Session::new();

            if ignored > 0 {
                convert_log!(session, "ignoring {} extra argument(s)", ignored);
            }

            match Converter::new(input, output)
                .with_session(session)
                .convert()
            {
                Ok(()) => 0,
                Err(e) => {
                    println!("{e}");
                    e.exit_code()
                }
            }
        }
    }
}

fn main() {
    let action = cli::parse_args().unwrap_or_else(|e| e.exit());
    std::process::exit(run(action));
}
