use project_importer::core::instructions::write_instructions;

fn main() -> std::io::Result<()> {
    let stdout = std::io::stdout();
    write_instructions(&mut stdout.lock())
}
