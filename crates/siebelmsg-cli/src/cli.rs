use clap::Parser;

/// A parser for Oracle Siebel's proprietary `SiebelMessage` format.
#[derive(Parser, Debug)]
#[command(name = "smp", version, about)]
pub struct Args {
    /// File to decode, or `-` for standard input
    #[arg(value_name = "FILE|-")]
    pub input: String,
}

impl Args {
    /// Whether the input names standard input.
    pub fn is_stdin(&self) -> bool {
        self.input == "-"
    }
}
