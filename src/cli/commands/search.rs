use clap::Args;

use crate::api::{sanitize_search_input, AdvocateQuery};
use crate::cli::utils::{output_advocates, output_validation_issues};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::AdvocateService;
use crate::source;

#[derive(Args)]
pub struct SearchArgs {
    #[arg(help = "Free-text search across names, city, degree, specialties and experience")]
    pub term: Option<String>,
    #[arg(long, help = "Page number (1-based)")]
    pub page: Option<String>,
    #[arg(long, help = "Results per page")]
    pub limit: Option<String>,
}

impl SearchArgs {
    /// Same shape the HTTP endpoint receives, after client-side sanitizing.
    fn to_query(&self) -> AdvocateQuery {
        AdvocateQuery {
            search: self.term.as_deref().map(sanitize_search_input),
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
    }
}

pub async fn handle(args: SearchArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let params = match args.to_query().validate(&config.search) {
        Ok(params) => params,
        Err(issues) => {
            output_validation_issues(&output_format, &issues)?;
            anyhow::bail!("invalid search parameters");
        }
    };

    let service = AdvocateService::new(source::from_config(&config.database)?);
    let response = service.search(&params).await?;

    output_advocates(&output_format, &response)
}
