//! The `Settings` configuration object consulted by every pass.
//!
//! A `Settings` value is read-only for the lifetime of a session: passes
//! take `&Settings`, never `&mut Settings`. `serde` derives let an external
//! driver load one from JSON/TOML without the core needing to know the
//! format.

use std::collections::HashMap;

/// How the Output Visitor lays out emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OutputMode {
    /// No line breaks except at `line_break_threshold` safe points.
    SingleLine,
    /// One statement per line, indented per `indent_size`.
    MultipleLines,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::SingleLine
    }
}

/// Where a block's opening `{` lands relative to its header, in `MultipleLines` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlockStart {
    /// `{` on its own line.
    NewLine,
    /// `{` on the same line as the header.
    SameLine,
    /// Preserve whatever the source used.
    UseSource,
}

impl Default for BlockStart {
    fn default() -> Self {
        BlockStart::SameLine
    }
}

/// Renaming policy consulted by the Renamer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LocalRenaming {
    /// Rename nothing.
    KeepAll,
    /// Rename everything except bindings whose name starts with the
    /// localization prefix (default `"L_"`).
    KeepLocalizationVars,
    /// Rename every eligible binding.
    CrunchAll,
}

impl Default for LocalRenaming {
    fn default() -> Self {
        LocalRenaming::CrunchAll
    }
}

/// How the Analyzer treats scopes containing a call to `eval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EvalTreatment {
    /// Assume `eval` does not introduce new bindings; rename normally.
    Ignore,
    /// Disable renaming only in the function directly containing the `eval` call.
    MakeImmediateSafe,
    /// Disable renaming in the containing function and everything nested in it.
    MakeAllSafe,
}

impl Default for EvalTreatment {
    fn default() -> Self {
        EvalTreatment::MakeImmediateSafe
    }
}

/// Bitmap of individually disableable Transformer rewrites. A hand-rolled `u32` mask rather than a `bitflags`-crate
/// newtype: no bitflag crate appears anywhere in the retrieved example pack,
/// and a single mask isn't worth introducing one for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KillSwitch(pub u32);

impl KillSwitch {
    /// Dead-code removal (unreachable statements, unused locals/parameters).
    pub const DEAD_CODE_REMOVAL: u32 = 1 << 0;
    /// Constant folding of literal arithmetic/concatenation/conditionals.
    pub const LITERAL_FOLDING: u32 = 1 << 1;
    /// `new Array(...)`/`new Object()`/`new RegExp(...)` collapse.
    pub const NEW_COLLAPSE: u32 = 1 << 2;
    /// Lifting repeated literals to a generated `var`.
    pub const LITERAL_COMBINING: u32 = 1 << 3;
    /// Pushing `!` through comparisons/booleans when it shortens output.
    pub const LOGICAL_NOT_INVERSION: u32 = 1 << 4;
    /// Brace dropping, `var` merging, if/else normalization.
    pub const BLOCK_FLATTENING: u32 = 1 << 5;
    /// Rewriting `if (c) a; else b;` to `c?a:b` / `c&&a||b`.
    pub const CONDITIONAL_TO_LOGICAL: u32 = 1 << 6;
    /// Stripping `debugger` statements and configured debug-lookup calls.
    pub const DEBUG_STRIP: u32 = 1 << 7;

    /// All rewrites enabled.
    pub fn all() -> Self {
        KillSwitch(u32::MAX)
    }

    /// All rewrites disabled.
    pub fn none() -> Self {
        KillSwitch(0)
    }

    /// Whether the rewrite named by `flag` is currently enabled (i.e. *not*
    /// killed).
    pub fn is_enabled(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    /// Disable the rewrite named by `flag`.
    pub fn kill(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

impl Default for KillSwitch {
    fn default() -> Self {
        KillSwitch::all()
    }
}

/// Top-level configuration consulted by every pass.
///
/// Read-only for the duration of a session; mutating it mid-session is a
/// caller error.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// `SingleLine` or `MultipleLines` output.
    pub output_mode: OutputMode,
    /// Spaces per indent level in `MultipleLines` mode.
    pub indent_size: u32,
    /// Where `{` lands in `MultipleLines` mode.
    pub blocks_start_on_same_line: BlockStart,
    /// Add a trailing `;` after the final statement.
    pub term_semicolons: bool,
    /// In `SingleLine` mode, break after this column at the next safe point.
    pub line_break_threshold: Option<u32>,
    /// Per-rewrite enable/disable bitmap.
    pub kill_switch: KillSwitch,
    /// Renaming policy.
    pub local_renaming: LocalRenaming,
    /// Prefix exempted from renaming under `KeepLocalizationVars` (default `"L_"`).
    pub localization_prefix: String,
    /// Whether manual rename pairs also apply to matching property accesses.
    pub manual_renames_properties: bool,
    /// Strip named-function-expression names that are never referenced.
    pub remove_function_expression_names: bool,
    /// Forbid renaming function declaration/expression names entirely.
    pub preserve_function_names: bool,
    /// How scopes containing `eval(...)` are treated by the Renamer.
    pub eval_treatment: EvalTreatment,
    /// Lift repeated identical literals to a generated `var`.
    pub combine_duplicate_literals: bool,
    /// Fold constant expressions at compile time.
    pub eval_literal_expressions: bool,
    /// Apply old-WebKit brace-wrapping workarounds in the Output Visitor.
    pub mac_safari_quirks: bool,
    /// Collapse `new Array(...)`/`new Object()` to literal form.
    pub collapse_to_literal: bool,
    /// Hoist declarations to the top of their enclosing scope.
    pub reorder_scope_declarations: bool,
    /// Drop unreachable statements and unused declarations.
    pub remove_unneeded_code: bool,
    /// Escape `</script`, `<!--`, `-->` inside string literals.
    pub inline_safe_strings: bool,
    /// Remove `debugger` statements and configured debug-lookup calls.
    pub strip_debug_statements: bool,
    /// Pass conditional-compilation constructs through as plain comments.
    pub ignore_conditional_compilation: bool,
    /// Preserve `/*! ... */` important comments verbatim.
    pub preserve_important_comments: bool,
    /// Recognize `<% ... %>` ASP.NET blocks.
    pub allow_embedded_aspnet_blocks: bool,
    /// Conditional-compilation `@name` → value map.
    pub preprocessor_defines: HashMap<String, String>,
    /// Names treated as already-defined globals (suppresses `UndefinedReference`).
    pub known_globals: Vec<String>,
    /// Names forbidden from automatic renaming.
    pub no_auto_rename: Vec<String>,
    /// Explicit `from` → `to` manual rename pairs; override the automatic allocator.
    pub rename_pairs: HashMap<String, String>,
    /// Identifier chains (e.g. `["console", "log"]`) treated as debug calls.
    pub debug_lookups: Vec<Vec<String>>,
    /// Diagnostic codes suppressed from the `errors` output stream.
    pub ignore_errors: Vec<String>,
    /// Name → string table expanded to a `var NAME = {...}` header.
    pub resource_strings: HashMap<String, HashMap<String, String>>,
    /// Whether `Minifier::minify_javascript` should also produce a source
    /// map.
    pub source_map: bool,
    /// Which on-disk representation to emit when `source_map` is set.
    pub source_map_format: crate::sourcemap::SourceMapFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_mode: OutputMode::default(),
            indent_size: 4,
            blocks_start_on_same_line: BlockStart::default(),
            term_semicolons: false,
            line_break_threshold: None,
            kill_switch: KillSwitch::default(),
            local_renaming: LocalRenaming::default(),
            localization_prefix: "L_".to_string(),
            manual_renames_properties: false,
            remove_function_expression_names: false,
            preserve_function_names: false,
            eval_treatment: EvalTreatment::default(),
            combine_duplicate_literals: false,
            eval_literal_expressions: true,
            mac_safari_quirks: false,
            collapse_to_literal: true,
            reorder_scope_declarations: false,
            remove_unneeded_code: true,
            inline_safe_strings: true,
            strip_debug_statements: false,
            ignore_conditional_compilation: false,
            preserve_important_comments: true,
            allow_embedded_aspnet_blocks: false,
            preprocessor_defines: HashMap::new(),
            known_globals: Vec::new(),
            no_auto_rename: Vec::new(),
            rename_pairs: HashMap::new(),
            debug_lookups: Vec::new(),
            ignore_errors: Vec::new(),
            resource_strings: HashMap::new(),
            source_map: false,
            source_map_format: crate::sourcemap::SourceMapFormat::default(),
        }
    }
}

impl Settings {
    /// Whether `name` is exempt from automatic renaming under the current policy.
    pub fn is_rename_exempt(&self, name: &str) -> bool {
        match self.local_renaming {
            LocalRenaming::KeepAll => true,
            LocalRenaming::KeepLocalizationVars => name.starts_with(&self.localization_prefix),
            LocalRenaming::CrunchAll => false,
        }
        || self.no_auto_rename.iter().any(|n| n == name)
    }

    /// Validate this `Settings` value before it drives a session. Never aborts; every problem found is
    /// returned so a caller can report them all at once.
    pub fn validate(&self) -> Vec<crate::diagnostics::ConfigErrorKind> {
        use crate::diagnostics::ConfigErrorKind;
        let mut errors = Vec::new();

        for target in self.rename_pairs.values() {
            if !crate::scanner::is_valid_identifier(target) {
                errors.push(ConfigErrorKind::InvalidRenameTarget { name: target.clone() });
            }
        }
        for name in self.preprocessor_defines.keys() {
            if !crate::scanner::is_valid_identifier(name) {
                errors.push(ConfigErrorKind::InvalidDefineName { name: name.clone() });
            }
        }

        // `rename_pairs` is a `HashMap<String, String>`, so two different
        // targets for the same source name can never coexist in it — the
        // `ConfigErrorKind::ContradictoryManualRenames` case is structurally
        // prevented by this data model rather than needing a runtime check
        // here.

        errors
    }
}
