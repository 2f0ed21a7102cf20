use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bernoulli_spam_classifier::{
    evaluate, files_in_folder, learn_corpus, LearnedModel, Settings, TokenizerKind, TrainingCorpus,
};

/// Train a Bernoulli Naive Bayes spam filter and evaluate it on a testing folder
#[derive(Parser, Debug)]
#[command(name = "evaluate", version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// JSON settings file
    #[arg(short, long, env = "CLASSIFIER_CONFIG")]
    config: Option<PathBuf>,

    /// Folder of category 0 (spam) training documents
    #[arg(long, env = "SPAM_FOLDER")]
    spam: Option<PathBuf>,

    /// Folder of category 1 (ham) training documents
    #[arg(long, env = "HAM_FOLDER")]
    ham: Option<PathBuf>,

    /// Folder of documents to classify
    #[arg(long, env = "TESTING_FOLDER")]
    testing: Option<PathBuf>,

    #[arg(long, value_enum)]
    tokenizer: Option<TokenizerKind>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(spam) = &self.spam {
            settings.spam_folder = spam.clone();
        }
        if let Some(ham) = &self.ham {
            settings.ham_folder = ham.clone();
        }
        if let Some(testing) = &self.testing {
            settings.testing_folder = testing.clone();
        }
        if let Some(tokenizer) = self.tokenizer {
            settings.tokenizer = tokenizer;
        }

        Ok(settings)
    }

    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "bernoulli_spam_classifier=warn",
            1 => "bernoulli_spam_classifier=info",
            _ => "bernoulli_spam_classifier=debug",
        }
    }
}

#[derive(Debug)]
struct TrainingStats {
    spam_samples: usize,
    ham_samples: usize,
    spam_words: usize,
    ham_words: usize,
    unique_words: usize,
    priors: [f64; 2],
}

impl TrainingStats {
    fn new(corpus: &TrainingCorpus, model: &LearnedModel) -> Self {
        let [spam, ham] = corpus.categories();
        Self {
            spam_samples: spam.len(),
            ham_samples: ham.len(),
            spam_words: model.table(0).len(),
            ham_words: model.table(1).len(),
            unique_words: model.vocabulary_size(),
            priors: model.priors(),
        }
    }

    fn print(&self, labels: [&str; 2]) {
        let total = self.spam_samples + self.ham_samples;
        println!("=== Training Statistics ===");
        println!("Total samples: {}", total);
        println!(
            "{} samples: {} ({:.1}%)",
            labels[0],
            self.spam_samples,
            (self.spam_samples as f64 / total as f64) * 100.0
        );
        println!(
            "{} samples: {} ({:.1}%)",
            labels[1],
            self.ham_samples,
            (self.ham_samples as f64 / total as f64) * 100.0
        );
        println!("Words seen in {}: {}", labels[0], self.spam_words);
        println!("Words seen in {}: {}", labels[1], self.ham_words);
        println!("Unique words: {}", self.unique_words);
        println!("Prior P({}): {:.3}", labels[0], self.priors[0]);
        println!("Prior P({}): {:.3}", labels[1], self.priors[1]);
        println!("==========================");
    }
}

fn run(args: Args) -> Result<()> {
    let settings = args.settings()?;
    let labels = settings.labels();
    let tokenizer = settings.tokenizer.build();

    println!("Training the model...");
    let corpus = TrainingCorpus::from_folders(&settings.spam_folder, &settings.ham_folder)
        .context("listing training folders")?;
    let model = learn_corpus(&corpus, tokenizer.as_ref()).context("training the model")?;
    TrainingStats::new(&corpus, &model).print(labels);

    println!("Testing the model....");
    let testing = files_in_folder(&settings.testing_folder).context("listing testing folder")?;
    info!(documents = testing.len(), folder = %settings.testing_folder.display(), "classifying");
    let matrix = evaluate(&testing, &model, &labels, tokenizer.as_ref());

    if matrix.skipped() > 0 {
        println!("Skipped {} undecodable documents.", matrix.skipped());
    }
    println!("{}", matrix.summary(labels));

    Ok(())
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
