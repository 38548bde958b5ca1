use anyhow::Context as _;
use chomsky::{
    accept,
    automaton::{AnyAutomaton, AutomatonKind},
    grammar, Cfg, GrammarError,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run an automaton on the given inputs, one symbol per character.
    Accept {
        /// The kind of the automaton.
        #[arg(long, value_enum)]
        kind: Kind,

        /// The path of automaton definition file.
        input: PathBuf,

        /// The strings to run the automaton on.
        words: Vec<String>,
    },

    /// Convert an NFA or eNFA into a DFA.
    ToDfa {
        /// The kind of the automaton.
        #[arg(long, value_enum, default_value_t = NondeterministicKind::Enfa)]
        kind: NondeterministicKind,

        /// Specify the path of the generated DFA file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// The path of automaton definition file.
        input: PathBuf,
    },

    /// Apply a grammar transformation.
    Simplify {
        #[arg(long, value_enum, default_value_t = Step::NormalForm)]
        step: Step,

        /// Specify the path of the transformed grammar file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// The path of grammar definition file.
        input: PathBuf,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum)]
enum Kind {
    Dfa,
    Nfa,
    Enfa,
}

/// The automaton kinds accepted by subset construction.
#[derive(Debug, Copy, Clone, PartialEq, ValueEnum)]
enum NondeterministicKind {
    Nfa,
    Enfa,
}

impl From<NondeterministicKind> for Kind {
    fn from(kind: NondeterministicKind) -> Self {
        match kind {
            NondeterministicKind::Nfa => Kind::Nfa,
            NondeterministicKind::Enfa => Kind::Enfa,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum)]
enum Step {
    Unreachable,
    Nongenerating,
    Useless,
    Epsilon,
    UnitPairs,
    Binarize,
    NormalForm,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::debug!("parsed CLI args = {:?}", args);

    match args.command {
        Command::Accept { kind, input, words } => run_accept(kind, &input, &words)
            .with_context(|| anyhow::anyhow!("errored during processing {}", input.display())),
        Command::ToDfa {
            kind,
            output,
            input,
        } => run_to_dfa(kind.into(), &input, output.as_deref())
            .with_context(|| anyhow::anyhow!("errored during processing {}", input.display())),
        Command::Simplify {
            step,
            output,
            input,
        } => run_simplify(step, &input, output.as_deref())
            .with_context(|| anyhow::anyhow!("errored during processing {}", input.display())),
    }
}

fn load_automaton(kind: Kind, input: &Path) -> anyhow::Result<AnyAutomaton> {
    let kind = match kind {
        Kind::Dfa => AutomatonKind::DFA,
        Kind::Nfa => AutomatonKind::NFA,
        Kind::Enfa => AutomatonKind::ENFA,
    };
    let source = fs::read_to_string(input).context("failed to read the automaton file")?;
    let automaton = AnyAutomaton::parse(kind, &source)?;
    Ok(automaton)
}

fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, text).with_context(|| {
            anyhow::anyhow!("failed to write the result to {}", path.display())
        }),
        None => {
            println!("{}", text.trim_end());
            Ok(())
        }
    }
}

fn run_accept(kind: Kind, input: &Path, words: &[String]) -> anyhow::Result<()> {
    let automaton = load_automaton(kind, input)?;
    for word in words {
        let symbols: Vec<&str> = word
            .char_indices()
            .map(|(i, c)| &word[i..i + c.len_utf8()])
            .collect();
        let verdict = if accept(&automaton, &symbols) {
            "accept"
        } else {
            "reject"
        };
        println!("{}\t{}", verdict, word);
    }
    Ok(())
}

fn run_to_dfa(kind: Kind, input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let automaton = load_automaton(kind, input)?;
    let dfa = automaton.into_dfa();
    tracing::info!("to_dfa: {} states", dfa.len());
    write_output(output, &dfa.to_string())
}

fn run_simplify(step: Step, input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let cfg = Cfg::from_file(input)?;

    let transform: fn(&Cfg) -> Result<Cfg, GrammarError> = match step {
        Step::Unreachable => grammar::eliminate_unreachable,
        Step::Nongenerating => grammar::eliminate_nongenerating,
        Step::Useless => grammar::eliminate_useless,
        Step::Epsilon => grammar::eliminate_epsilon,
        Step::UnitPairs => grammar::eliminate_unit_pairs,
        Step::Binarize => grammar::binarize,
        Step::NormalForm => grammar::to_normal_form,
    };
    let transformed = transform(&cfg)?;
    if transformed.is_empty_language() {
        eprintln!("[warning] The grammar generates no string.");
    }

    write_output(output, &transformed.to_string())
}
