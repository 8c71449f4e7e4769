use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    Ok(vault_mcp::cli::run().await?)
}
