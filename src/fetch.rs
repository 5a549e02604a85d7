use std::path::Path;
use tracing::info;

use best_time::features::lite::LITE_ARTIFACTS;
use best_time::scoring::REGRESSOR_FILE;

pub async fn fetch_models(args: crate::FetchArgs) -> Result<(), String> {
    std::fs::create_dir_all(&args.dir)
        .map_err(|err| format!("failed to create model dir: {err}"))?;

    let client = reqwest::Client::new();
    let base = args.base_url.trim_end_matches('/');

    let mut names = LITE_ARTIFACTS.to_vec();
    names.push(REGRESSOR_FILE);

    for name in names {
        download(&client, base, name, &args.dir).await?;
    }

    info!("all model artifacts downloaded to {}", args.dir.display());
    Ok(())
}

async fn download(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    dir: &Path,
) -> Result<(), String> {
    let url = format!("{base}/{name}");
    info!("downloading {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| format!("request for {name} failed: {err}"))?;

    if !response.status().is_success() {
        return Err(format!("download of {name} failed: {}", response.status()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| format!("download of {name} failed: {err}"))?;

    let target = dir.join(name);
    std::fs::write(&target, &bytes)
        .map_err(|err| format!("failed to write {}: {err}", target.display()))?;
    Ok(())
}
