use anyhow::Result;

fn main() -> Result<()> {
    earmark_cli::main_entry()
}
