fn main() -> anyhow::Result<()> {
    tech_researcher::cli::run()
}
