use crate::{
    error::ModelDefinitionError,
    model::EntityModel,
    obs::sink::{ProjectionEvent, record},
    registry::{
        ModelRegistry, classify::classify_model, policy::EffectivePolicy,
        validate::validate_models,
    },
};
use jobgraph_config::EngineConfig;
use std::collections::BTreeMap;

///
/// RegistryBuilder
///
/// Collects model declarations and configuration, then validates and
/// classifies them in one step. A registry is either fully valid or not
/// built at all.
///

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    models: Vec<&'static EntityModel>,
    config: EngineConfig,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, model: &'static EntityModel) -> Self {
        self.models.push(model);
        self
    }

    #[must_use]
    pub fn register_all(mut self, models: &[&'static EntityModel]) -> Self {
        self.models.extend_from_slice(models);
        self
    }

    /// Apply export-policy overrides from configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ModelRegistry, ModelDefinitionError> {
        let mut by_name = BTreeMap::new();
        for model in &self.models {
            by_name.entry(model.name).or_insert(*model);
        }

        validate_models(&self.models, &by_name, &self.config)?;

        let mut models = BTreeMap::new();
        let mut fields = 0usize;
        for model in by_name.values() {
            let policy = EffectivePolicy::resolve(
                &model.policy,
                self.config.policy(model.name),
                &self.config.defaults,
            );
            let classified = classify_model(model, &by_name, policy);

            fields += classified.fields().len();
            models.insert(model.name, classified);
        }

        record(ProjectionEvent::RegistryBuilt {
            kinds: models.len(),
            fields,
        });

        Ok(ModelRegistry { models })
    }
}
