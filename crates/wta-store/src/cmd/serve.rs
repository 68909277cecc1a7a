use anyhow::Result;

use crate::ServeArgs;
use crate::server::run_server;

/// Start the HTTP server and block until shutdown.
pub async fn serve(args: ServeArgs) -> Result<()> {
    run_server(args.into()).await
}
