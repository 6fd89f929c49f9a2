//! Launching the chosen app, or opening its store page
//!
//! Dispatch failures are reported but never change the exit status: by the
//! time we get here the user has made a valid choice.

use url::Url;

use drawer_core::prelude::*;
use drawer_core::{EntryPoint, Selection};
use drawer_probe::{Invocation, ToolOutput, ToolRunner};

use crate::config::RunConfig;

/// What to do with a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    /// Start `<identifier>/<entry point>` with the launch tool
    Launch { target: String },
    /// Open the store details page with the URL-open tool
    OpenStore { url: String },
}

/// Result of running the dispatch tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub action: DispatchAction,
    pub output: ToolOutput,
}

/// Store details URL for `identifier`, e.g. `...?id=com.example.app`
pub fn store_url(details_url: &str, identifier: &str) -> Result<String> {
    let mut url = Url::parse(details_url)
        .map_err(|e| Error::store_url(format!("{:?}: {}", details_url, e)))?;
    url.query_pairs_mut().append_pair("id", identifier);
    Ok(url.into())
}

/// Turns selections into launch or store-open invocations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    launcher: String,
    url_opener: String,
    user: String,
    details_url: String,
}

impl Dispatcher {
    pub fn new(
        launcher: impl Into<String>,
        url_opener: impl Into<String>,
        user: impl Into<String>,
        details_url: impl Into<String>,
    ) -> Self {
        Self {
            launcher: launcher.into(),
            url_opener: url_opener.into(),
            user: user.into(),
            details_url: details_url.into(),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            config.launcher.clone(),
            config.url_opener.clone(),
            config.user(),
            config.details_url.clone(),
        )
    }

    pub fn plan(&self, selection: &Selection) -> Result<DispatchAction> {
        match &selection.entry_point {
            EntryPoint::Component(component) => Ok(DispatchAction::Launch {
                target: format!("{}/{}", selection.identifier, component),
            }),
            EntryPoint::Unknown => Ok(DispatchAction::OpenStore {
                url: store_url(&self.details_url, &selection.identifier)?,
            }),
        }
    }

    pub fn invocation(&self, action: &DispatchAction) -> Invocation {
        match action {
            DispatchAction::Launch { target } => Invocation::new(&self.launcher).args([
                "start",
                "--user",
                self.user.as_str(),
                "-n",
                target.as_str(),
            ]),
            DispatchAction::OpenStore { url } => Invocation::new(&self.url_opener).arg(url),
        }
    }

    /// Run the launch or open tool for `selection`.
    ///
    /// Only an unusable store URL is an error; a failing tool is logged and
    /// its output returned.
    pub async fn dispatch<R: ToolRunner>(
        &self,
        runner: &R,
        selection: &Selection,
    ) -> Result<DispatchOutcome> {
        let action = self.plan(selection)?;
        let invocation = self.invocation(&action);

        match &action {
            DispatchAction::Launch { target } => info!("Launching {}", target),
            DispatchAction::OpenStore { url } => {
                info!("{} has no launcher activity, opening {}", selection.identifier, url)
            }
        }

        let output = runner.run(&invocation, None).await;
        if !output.succeeded {
            warn!("{} failed: {}", invocation, output.text);
        }

        Ok(DispatchOutcome { action, output })
    }
}
