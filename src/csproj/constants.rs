//! MSBuild element and attribute names used when editing generated project files

/// Element holding build properties
///
/// Example: `<PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">`
pub const PROPERTY_GROUP: &str = "PropertyGroup";

/// Element holding build items
pub const ITEM_GROUP: &str = "ItemGroup";

/// Attribute scoping a group to a configuration
pub const CONDITION: &str = "Condition";

/// Attribute naming the file an item refers to
pub const INCLUDE: &str = "Include";

/// Item loading a Roslyn analyzer assembly
///
/// Example: `<Analyzer Include="Packages/Analyzers/Foo.dll" />`
pub const ANALYZER: &str = "Analyzer";

/// Item passing an extra file (e.g. `stylecop.json`) to the analyzers
pub const ADDITIONAL_FILES: &str = "AdditionalFiles";

/// Property pointing at the ruleset used by code analysis
pub const CODE_ANALYSIS_RULE_SET: &str = "CodeAnalysisRuleSet";

/// Property selecting the C# language version
pub const LANG_VERSION: &str = "LangVersion";

/// Substring of a `Condition` that identifies a configuration+platform scoped group
pub const CONFIGURATION_PLATFORM_MARKER: &str = "'$(Configuration)|$(Platform)'";

/// File extension of analyzer assemblies
pub const ANALYZER_EXTENSION: &str = "dll";

/// File extension of analyzer additional files
pub const ADDITIONAL_FILE_EXTENSION: &str = "json";

/// File extension of rulesets
pub const RULESET_EXTENSION: &str = "ruleset";

/// File extension of generated project files
pub const PROJECT_FILE_EXTENSION: &str = "csproj";
