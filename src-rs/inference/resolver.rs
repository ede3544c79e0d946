use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::presets::Profile;
use super::table::{AgentConfig, ModelSpec};
use super::task::TaskKind;
use crate::error::ConfigurationError;

/// Where the active table came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSource {
    Profile(Profile),
    Custom,
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Profile(profile) => write!(f, "{}", profile),
            TableSource::Custom => write!(f, "custom"),
        }
    }
}

struct ActiveTable {
    source: TableSource,
    table: Arc<AgentConfig>,
}

/// Maps task kinds to model specs. Tables are never edited in place; a
/// profile change replaces the whole table in one step.
pub struct ConfigResolver {
    active: RwLock<ActiveTable>,
}

impl ConfigResolver {
    /// Validates `table` before accepting it.
    pub fn new(table: AgentConfig) -> Result<Self, ConfigurationError> {
        table.validate()?;
        Ok(Self::with_source(TableSource::Custom, table))
    }

    pub fn from_profile(profile: Profile) -> Self {
        Self::with_source(TableSource::Profile(profile), profile.table().clone())
    }

    fn with_source(source: TableSource, table: AgentConfig) -> Self {
        Self {
            active: RwLock::new(ActiveTable {
                source,
                table: Arc::new(table),
            }),
        }
    }

    pub fn resolve(&self, task: TaskKind) -> ModelSpec {
        *self.snapshot().get(task)
    }

    /// Lookup by wire name; unknown names are a caller error.
    pub fn resolve_named(&self, task: &str) -> Result<ModelSpec, ConfigurationError> {
        let task = task.parse::<TaskKind>()?;
        Ok(self.resolve(task))
    }

    /// The full active table. Holding it pins that table even across swaps.
    pub fn snapshot(&self) -> Arc<AgentConfig> {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        active.table.clone()
    }

    pub fn source(&self) -> TableSource {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        active.source
    }

    pub fn use_profile(&self, profile: Profile) {
        self.swap(TableSource::Profile(profile), profile.table().clone());
    }

    /// Installs a custom table. An invalid table is rejected and the current
    /// one stays active.
    pub fn replace(&self, table: AgentConfig) -> Result<(), ConfigurationError> {
        table.validate()?;
        self.swap(TableSource::Custom, table);
        Ok(())
    }

    fn swap(&self, source: TableSource, table: AgentConfig) {
        let next = ActiveTable {
            source,
            table: Arc::new(table),
        };
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = next;
        info!(source = %source, "agent config table swapped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ModelId;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    #[test]
    fn resolves_every_task_from_default_profile() {
        let resolver = ConfigResolver::from_profile(Profile::Default);
        for task in TaskKind::ALL {
            let spec = resolver.resolve(task);
            assert!(spec.max_tokens > 0);
            assert!((0.0..=2.0).contains(&spec.temperature));
        }
        assert_eq!(resolver.source(), TableSource::Profile(Profile::Default));
    }

    #[test]
    fn resolve_named_rejects_unknown_tasks() {
        let resolver = ConfigResolver::from_profile(Profile::Default);
        assert_eq!(
            resolver.resolve_named("writePoetry").unwrap_err(),
            ConfigurationError::UnknownTask("writePoetry".to_string())
        );
        assert_eq!(
            resolver.resolve_named("fastCodeFixer").unwrap().primary_model,
            ModelId::DeepseekV3
        );
    }

    #[test]
    fn profile_swap_replaces_whole_table() {
        let resolver = ConfigResolver::from_profile(Profile::Default);
        let before = resolver.snapshot();

        resolver.use_profile(Profile::Premium);

        assert_eq!(*resolver.snapshot(), *Profile::Premium.table());
        assert_eq!(resolver.resolve(TaskKind::FastCodeFixer).primary_model, ModelId::DeepseekR1);
        assert_eq!(resolver.source().to_string(), "premium");
        // Earlier snapshots are untouched.
        assert_eq!(*before, *Profile::Default.table());
    }

    #[test]
    fn invalid_replacement_keeps_current_table() {
        let resolver = ConfigResolver::from_profile(Profile::CostOptimized);
        let mut broken = Profile::Premium.table().clone();
        broken.blueprint.temperature = 3.5;

        assert!(resolver.replace(broken).is_err());
        assert_eq!(resolver.source(), TableSource::Profile(Profile::CostOptimized));
        assert_eq!(*resolver.snapshot(), *Profile::CostOptimized.table());
    }

    #[test]
    fn custom_table_is_labelled_custom() {
        let mut table = Profile::Default.table().clone();
        table.fast_code_fixer = ModelSpec::new(ModelId::Qwen3Coder, 1000, 0.0);
        let resolver = ConfigResolver::new(table).unwrap();

        assert_eq!(resolver.source(), TableSource::Custom);
        assert_eq!(resolver.resolve(TaskKind::FastCodeFixer).fallback_model, None);
    }

    #[test]
    fn readers_never_see_a_half_swapped_table() {
        let resolver = ConfigResolver::from_profile(Profile::Default);
        let done = AtomicBool::new(false);
        let default = Profile::Default.table();
        let premium = Profile::Premium.table();

        thread::scope(|scope| {
            scope.spawn(|| {
                for round in 0..2_000 {
                    let profile = if round % 2 == 0 { Profile::Premium } else { Profile::Default };
                    resolver.use_profile(profile);
                }
                done.store(true, Ordering::Release);
            });
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut seen = 0usize;
                    while !done.load(Ordering::Acquire) || seen == 0 {
                        let table = resolver.snapshot();
                        assert!(*table == *default || *table == *premium);
                        seen += 1;
                    }
                });
            }
        });

        assert_eq!(*resolver.snapshot(), *default);
    }
}
