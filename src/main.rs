// Entrypoint for the console client.
// - Keeps `main` small: create an API client and hand it to the loop.
// - Returns `anyhow::Result` to simplify error handling.

use widget_registry::{api::ApiClient, ui::repl};

fn main() -> anyhow::Result<()> {
    // Client is configured by the environment variable `WIDGET_API_URL`
    // or defaults to http://127.0.0.1:5000. See `api::ApiClient::from_env`.
    let api = ApiClient::from_env()?;

    // Run the command loop. This call blocks until the user types `x`.
    repl(api)?;
    Ok(())
}
