//! LLM provider registry (spec §4.F, §4.K).
//!
//! The same registry resolves providers for both metadata extraction and
//! reranking roles; `govdocs-infrastructure`'s config layer selects distinct
//! provider names per role (spec §6 "provider selection per role").

use crate::ports::providers::LlmProvider;
use crate::value_objects::LlmProviderConfig;

crate::impl_registry!(
    provider_trait: LlmProvider,
    config_type: LlmProviderConfig,
    entry_type: LlmProviderEntry,
    slice_name: LLM_PROVIDERS,
    resolve_fn: resolve_llm_provider,
    list_fn: list_llm_providers
);
