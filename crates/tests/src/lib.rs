//! Cross-component scenario tests for the soundpanel workspace

#[cfg(test)]
mod panel_integration;
