// ============================================================================
// LocaleRelay - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Translate command
    ("translate.start", "Starting {} v{} @{}"),
    ("translate.valid_languages", "Valid languages:"),
    ("translate.direction", "Translating {} {} {} using the {} backend"),
    ("translate.written", "Wrote {}"),
    // Walker
    ("walker.translating", "Translating [{}]"),
    // Summary
    ("summary.processed", "Processed {} strings in [{}] seconds."),
    ("summary.translated", "Translated: {}"),
    ("summary.fallbacks", "Kept original text after failures: {}"),
    ("summary.no_content", "No translation returned: {}"),
    ("summary.empty", "Empty values: {}"),
    // Languages command
    ("languages.header", "Supported languages ({}):"),
    // Init command
    ("init.start", "Initializing configuration file..."),
    ("init.config_exists", "Configuration file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite the existing file"),
    ("init.config_created", "Configuration file created: {}"),
    (
        "init.next_steps",
        "Edit the file, then run: locale-relay translate -y <file> -l <lang>",
    ),
    ("init.create_failed", "Failed to create configuration file: {}"),
];
