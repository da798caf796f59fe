use std::fmt;

/// Steps of one `init` invocation, in execution order.
///
/// Any failure aborts the remaining steps. The error returned from `init`
/// names the step that was running, which is the one after the last stage
/// reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InitStage {
    Start,
    NameValidated,
    TemplateFetched,
    AddonsResolved,
    DirectoryCreated,
    FilesCopied,
    ManifestMerged,
    DependenciesInstalled,
    Done,
}

impl InitStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::NameValidated => "name-validated",
            Self::TemplateFetched => "template-fetched",
            Self::AddonsResolved => "addons-resolved",
            Self::DirectoryCreated => "directory-created",
            Self::FilesCopied => "files-copied",
            Self::ManifestMerged => "manifest-merged",
            Self::DependenciesInstalled => "dependencies-installed",
            Self::Done => "done",
        }
    }

    /// The stage that follows this one. `Done` is terminal.
    pub const fn next(self) -> Self {
        match self {
            Self::Start => Self::NameValidated,
            Self::NameValidated => Self::TemplateFetched,
            Self::TemplateFetched => Self::AddonsResolved,
            Self::AddonsResolved => Self::DirectoryCreated,
            Self::DirectoryCreated => Self::FilesCopied,
            Self::FilesCopied => Self::ManifestMerged,
            Self::ManifestMerged => Self::DependenciesInstalled,
            Self::DependenciesInstalled | Self::Done => Self::Done,
        }
    }

    /// Whether the project directory exists on disk at this point.
    pub fn has_created_directory(&self) -> bool {
        *self >= Self::DirectoryCreated
    }
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(InitStage::Start < InitStage::TemplateFetched);
        assert!(InitStage::FilesCopied < InitStage::Done);
    }

    #[test]
    fn directory_exists_only_after_creation() {
        assert!(!InitStage::AddonsResolved.has_created_directory());
        assert!(InitStage::DirectoryCreated.has_created_directory());
        assert!(InitStage::ManifestMerged.has_created_directory());
    }

    #[test]
    fn next_walks_every_stage_once() {
        let mut stage = InitStage::Start;
        let mut seen = vec![stage];
        while stage != InitStage::Done {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(seen.len(), 9);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(InitStage::Done.next(), InitStage::Done);
    }
}
