//! CLI: program graph dumps → (schema | symbol list)
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use ts_jsonschema::error::LoadError;
use ts_jsonschema::path_de::read_json_file;
use ts_jsonschema::{generate, output, Options, Program, SchemaGenerator, ALL_TYPES};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate JSON Schema (draft-04) documents from a type-checked TypeScript program graph
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate the schema for one type, or every user type with `--type '*'`
    Generate(GenerateOut),
    /// list the types declared outside the default library
    Symbols(SymbolsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more program graph dumps (JSON). May be literal paths or quoted glob patterns;
    /// later files win on id clashes
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct SchemaSettings {
    /// inline named types instead of emitting `$ref` + `definitions`
    #[arg(long)]
    no_ref: bool,
    /// emit `$ref` for type aliases too
    #[arg(long)]
    alias_ref: bool,
    /// wrap the requested type itself in a `$ref`
    #[arg(long)]
    top_ref: bool,
    /// set `title` on every definition
    #[arg(long)]
    titles: bool,
    /// add an empty `defaultProperties` to object schemas
    #[arg(long)]
    default_props: bool,
    /// default `additionalProperties` to false
    #[arg(long)]
    no_extra_props: bool,
    /// emit `propertyOrder`
    #[arg(long)]
    property_order: bool,
    /// emit `typeof: function` for function types
    #[arg(long)]
    type_of_keyword: bool,
    /// emit `required` for non-optional properties
    #[arg(long)]
    required: bool,
    /// the program was checked with strictNullChecks
    #[arg(long)]
    strict_null_checks: bool,
    /// generate even when the program carries diagnostics
    #[arg(long)]
    ignore_errors: bool,
    /// extra annotation names to copy into the schema as keywords
    #[arg(long, num_args = 1..)]
    validation_keywords: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    schema_settings: SchemaSettings,

    /// type to generate; `*` for all user types
    #[arg(long = "type", short = 't', default_value = ALL_TYPES)]
    target: String,

    /// JSON options file (camelCase keys); flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct SymbolsOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_program(&self) -> Result<Program, LoadError> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        Program::from_files(&source_paths)
    }
}

impl SchemaSettings {
    /// Flags only ever switch a setting away from its default.
    fn apply_to(&self, options: &mut Options) {
        let Self {
            no_ref,
            alias_ref,
            top_ref,
            titles,
            default_props,
            no_extra_props,
            property_order,
            type_of_keyword,
            required,
            strict_null_checks,
            ignore_errors,
            validation_keywords,
        } = self;
        if *no_ref { options.use_ref = false; }
        if *alias_ref { options.use_type_alias_ref = true; }
        if *top_ref { options.use_root_ref = true; }
        if *titles { options.use_title = true; }
        if *default_props { options.use_default_properties = true; }
        if *no_extra_props { options.disable_extra_properties = true; }
        if *property_order { options.use_property_order = true; }
        if *type_of_keyword { options.use_type_of_keyword = true; }
        if *required { options.generate_required = true; }
        if *strict_null_checks { options.strict_null_checks = true; }
        if *ignore_errors { options.ignore_errors = true; }
        options.validation_keywords.extend(validation_keywords.iter().cloned());
    }
}

impl GenerateOut {
    fn options(&self) -> anyhow::Result<Options> {
        let mut options = match self.config.as_ref() {
            Some(path) => read_json_file::<Options>(path)?,
            None => Options::default(),
        };
        self.schema_settings.apply_to(&mut options);
        if let Some(out) = self.out.as_ref() {
            options.out = Some(out.clone());
        }
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Level for this crate's own log output.
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        }
    }

    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match &self.cmd {
            Command::Generate(target) => {
                let options = target.options()?;
                let program = target.input_settings.load_program()?;
                let schema = generate(&program, &target.target, &options)
                    .with_context(|| format!("failed to generate a schema for `{}`", target.target))?;
                let Some(schema) = schema else {
                    return Ok(ExitCode::FAILURE);
                };
                output::write_schema(&schema, options.out.as_deref()).with_context(|| match options.out.as_ref() {
                    Some(path) => format!("failed to write {}", path.display()),
                    None => "failed to write to stdout".to_string(),
                })?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Symbols(target) => {
                let program = target.input_settings.load_program()?;
                let options = Options::default();
                let generator = SchemaGenerator::new(&program, &options)?;
                for name in generator.user_symbols() {
                    println!("{name}");
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(LoadError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
