/// Gemini photorealism client.
pub mod realism;
