use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    taskboard::tui::run().await
}
