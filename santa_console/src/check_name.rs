use secret_santa::config::ClientConfig;
use secret_santa::name_check::{NameCheckOutcome, NameChecker, RenameTarget};

use crate::http_transport::HttpTransport;


// Prints "OK" if the name can be used. Otherwise fails with the message the web form would show.
pub async fn run(config: &ClientConfig, target: RenameTarget, candidate: String) -> anyhow::Result<()> {
    let checker = NameChecker::from_config(HttpTransport::new(), config)?;
    let request = target.request(candidate);
    log::info!("Asking {} about \"{}\"", checker.base_url(), request.candidate());
    match checker.check(&request).await {
        NameCheckOutcome::Available => {
            println!("OK");
            Ok(())
        }
        NameCheckOutcome::Rejected(err) => {
            anyhow::bail!("Cannot use name \"{}\": {}", request.candidate(), err)
        }
        NameCheckOutcome::Failed(err) => Err(err.into()),
    }
}
