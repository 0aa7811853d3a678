use anyhow::{Context, Result};
use clap::Parser;
use ghe_release_lib::config::{FetchParams, Token};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghe-release")]
#[command(about = "Download the assets of a GitHub Enterprise release")]
#[command(version)]
pub struct Cli {
    /// JSON file holding the module arguments, as written by the automation host.
    /// Replaces the parameter flags below.
    #[arg(conflicts_with_all = ["url", "owner", "repo", "tag", "output_path", "asset_names", "timeout", "check"])]
    pub args_file: Option<PathBuf>,

    #[command(flatten)]
    pub fetch_args: FetchArgs,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// Base URL of the GitHub Enterprise server (e.g. https://github.example.com)
    #[arg(long, required_unless_present = "args_file")]
    pub url: Option<String>,

    /// Repository owner
    #[arg(long, required_unless_present = "args_file")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, required_unless_present = "args_file")]
    pub repo: Option<String>,

    /// Access token. Ignored when an args file is given; the file's token is used
    #[arg(
        long,
        env = "GHE_TOKEN",
        hide_env_values = true,
        required_unless_present = "args_file"
    )]
    pub token: Option<String>,

    /// Release tag (defaults to the latest release)
    #[arg(long)]
    pub tag: Option<String>,

    /// Directory to put the assets in (defaults to the current directory)
    #[arg(long)]
    pub output_path: Option<PathBuf>,

    /// Asset to download; repeat or separate with commas. Downloads every asset when omitted
    #[arg(long = "asset-name", value_delimiter = ',')]
    pub asset_names: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Only report, do not download anything
    #[arg(long)]
    pub check: bool,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Print debug output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_params(self) -> Result<FetchParams> {
        match self.args_file {
            Some(path) => {
                if self.fetch_args.token.is_some() {
                    tracing::warn!("--token / GHE_TOKEN is ignored, using the token from the args file");
                }
                FetchParams::from_args_file(&path).with_context(|| {
                    format!("Failed to read module arguments from {}", path.display())
                })
            }
            None => self.fetch_args.into_params(),
        }
    }
}

impl FetchArgs {
    fn into_params(self) -> Result<FetchParams> {
        let url = self.url.context("--url is required")?;
        let owner = self.owner.context("--owner is required")?;
        let repo = self.repo.context("--repo is required")?;
        let token = self.token.context("--token is required")?;

        let mut params = FetchParams::new(&url, &owner, &repo, Token::new(token));
        params.tag = self.tag;
        params.output_path = self.output_path;
        let asset_names: Vec<String> = self
            .asset_names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        params.asset_names = (!asset_names.is_empty()).then_some(asset_names);
        params.timeout = self.timeout;
        params.check_mode = self.check;
        Ok(params)
    }
}
