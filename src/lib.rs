//! Unity csproj Analyzers Library
//! 
//! This library customizes the C# project files Unity generates, adding
//! Roslyn analyzer references and a fixed C# language version.

pub mod csproj;
pub mod error;
pub mod settings;
#[cfg(test)]
pub mod test_utils;
