use anyhow::Context;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::database::StaticPlayerStore;
use crate::roster::{without_sentinels, PlayerPerMinuteRecord};
use crate::services::fetch_per_minute;

pub async fn handle(file: &Path, include_totals: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let records = compute(file, include_totals).await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => {
            println!(
                "{:<24} {:<6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
                "NAME", "POS", "MPG", "PPM", "APM", "RPM", "TPM", "FPM"
            );
            for r in &records {
                println!(
                    "{:<24} {:<6} {:>6.1} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2}",
                    r.name, r.position, r.mpg, r.ppm, r.apm, r.rpm, r.tpm, r.fpm
                );
            }
        }
    }
    Ok(())
}

pub async fn compute(file: &Path, include_totals: bool) -> anyhow::Result<Vec<PlayerPerMinuteRecord>> {
    let store = StaticPlayerStore::from_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let records = fetch_per_minute(&store).await?;

    Ok(if include_totals {
        records
    } else {
        without_sentinels(records)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn computes_filtered_rates_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "A", "position": "G", "pts": 25, "ast": 5, "reb": 5, "tpg": 2, "fpg": 1, "mpg": 10}},
                {{"name": "Total", "position": "", "pts": 25, "ast": 5, "reb": 5, "tpg": 2, "fpg": 1, "mpg": 10}}
            ]"#
        )
        .unwrap();

        let filtered = compute(file.path(), false).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].ppm, 2.5);

        let all = compute(file.path(), true).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn bad_row_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "A", "position": "G", "pts": "many"}}]"#).unwrap();

        assert!(compute(file.path(), true).await.is_err());
    }
}
