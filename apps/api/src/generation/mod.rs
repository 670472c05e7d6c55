// Direct prompt passthrough to the model, plus model discovery.
// All LLM calls go through llm_client — no direct API calls here.

pub mod handlers;
