//! Pass/fail animation selection.

use std::path::{Path, PathBuf};

use results_core::Reply;
use tracing::{debug, warn};

use crate::messages;

/// Aggregate scores strictly above this pass.
pub const PASS_THRESHOLD: f64 = 300.0;

pub const PASSED_ASSET: &str = "tom-and-jerry-throwing-flowers-celebration-dance.gif";
pub const NOT_PASSED_ASSET: &str = "sushichaeng-tom-and-jerry.gif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    NotPassed,
}

impl Verdict {
    pub fn from_aggregate(aggregate: f64) -> Self {
        if aggregate > PASS_THRESHOLD {
            Verdict::Passed
        } else {
            Verdict::NotPassed
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            Verdict::Passed => PASSED_ASSET,
            Verdict::NotPassed => NOT_PASSED_ASSET,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Verdict::Passed => messages::PASSED_CAPTION,
            Verdict::NotPassed => messages::NOT_PASSED_CAPTION,
        }
    }
}

/// The chosen media: an asset to upload if one exists on disk, and its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaChoice {
    pub verdict: Verdict,
    pub asset: Option<PathBuf>,
    pub caption: &'static str,
}

impl MediaChoice {
    /// Animation when the asset exists, caption text otherwise.
    pub fn into_reply(self) -> Reply {
        match self.asset {
            Some(path) => Reply::Animation {
                path,
                caption: self.caption.to_string(),
            },
            None => Reply::text(self.caption),
        }
    }
}

/// Resolves verdict animations under an assets directory.
#[derive(Debug, Clone)]
pub struct MediaSelector {
    assets_dir: PathBuf,
}

impl MediaSelector {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn select(&self, aggregate: f64) -> MediaChoice {
        let verdict = Verdict::from_aggregate(aggregate);
        let path = self.assets_dir.join(verdict.asset_name());
        let asset = if path.is_file() {
            debug!(path = %path.display(), ?verdict, "Selected result animation");
            Some(path)
        } else {
            warn!(path = %path.display(), ?verdict, "Result animation not found, using text");
            None
        };
        MediaChoice {
            verdict,
            asset,
            caption: verdict.caption(),
        }
    }
}
