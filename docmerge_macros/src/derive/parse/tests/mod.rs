//! Unit tests for attribute and type parsing.


use quote::ToTokens;

/// Render tokens for comparison; `syn` types are compared by their token
/// text.
fn render(tokens: &impl ToTokens) -> String {
    tokens.to_token_stream().to_string()
}
