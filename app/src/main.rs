#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tradeboard_lib::run().await
}
