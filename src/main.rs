use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::info;

use moodlens::{server, EvaluationRunner, ImageClassifier};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify every image in a directory and report pass/fail counts
    Evaluate {
        /// Path to the trained ONNX model
        #[arg(long, default_value = "models/model.onnx")]
        model: PathBuf,

        /// Path to the labels file, one "<index> <name>" pair per line
        #[arg(long, default_value = "models/labels.txt")]
        labels: PathBuf,

        /// Directory containing the test images
        #[arg(long, default_value = "images")]
        images: PathBuf,

        /// Label counted as a failure; repeat the flag for several
        #[arg(long = "failure-label", default_values_t = [String::from("neutral"), String::from("happy")])]
        failure_labels: Vec<String>,

        /// Input width the model expects
        #[arg(long, default_value_t = 224)]
        width: u32,

        /// Input height the model expects
        #[arg(long, default_value_t = 224)]
        height: u32,
    },
    /// Serve the support-chat HTTP endpoint
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate {
            model,
            labels,
            images,
            failure_labels,
            width,
            height,
        } => evaluate(model, labels, images, failure_labels, width, height),
        Command::Serve { host, port } => server::serve(&host, port).await,
    }
}

fn evaluate(
    model: PathBuf,
    labels: PathBuf,
    images: PathBuf,
    failure_labels: Vec<String>,
    width: u32,
    height: u32,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    info!("Building classifier...");

    let classifier = ImageClassifier::builder()
        .with_model(&model)?
        .with_labels(&labels)?
        .with_input_size(width, height)
        .build()?;

    let classifier_info = classifier.info();
    info!(
        "Model loaded successfully ({} classes, took {:.2?})",
        classifier_info.num_classes,
        start_time.elapsed()
    );
    info!("Class labels: {:?}", classifier_info.class_labels);

    let runner = EvaluationRunner::new(classifier, images, failure_labels);
    let report = runner.run()?;
    println!("{}", report);

    info!("Total time: {:.2?}", start_time.elapsed());
    Ok(())
}
