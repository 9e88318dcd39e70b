use clap::{Parser, Subcommand};
use pms_core::{
    JsonFileStore, Patient, PatientInput, PatientService, PatientUpdate,
    DEFAULT_PATIENT_STORE_PATH,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pms")]
#[command(about = "Patient management system CLI")]
struct Cli {
    /// Path to the JSON patient store
    #[arg(long, global = true, default_value = DEFAULT_PATIENT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty store if none exists
    Init,
    /// List all patients
    List,
    /// Show one patient
    Show {
        /// Patient id
        id: String,
    },
    /// List patients ordered by height, weight or bmi
    Sort {
        /// Field to sort by: height, weight or bmi
        sort_by: String,
        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: String,
    },
    /// Create a patient
    Create {
        id: String,
        name: String,
        city: String,
        age: i64,
        /// Male, Female or Other
        gender: String,
        /// Height in metres
        height: f64,
        /// Weight in kilograms
        weight: f64,
    },
    /// Update selected fields of a patient
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Delete a patient
    Delete {
        /// Patient id
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let storage = Arc::new(JsonFileStore::new(cli.store));
    let service = PatientService::new(storage.clone());

    let Some(command) = cli.command else {
        println!("Use 'pms --help' for commands");
        return Ok(());
    };

    match command {
        Commands::Init => {
            if storage.initialise()? {
                println!("Created empty store at {}", storage.path().display());
            } else {
                println!("Store already exists at {}", storage.path().display());
            }
        }
        Commands::List => {
            let store = service.list()?;
            if store.is_empty() {
                println!("No patients found.");
            } else {
                for (id, patient) in store.iter() {
                    println!("{}: {}", id, describe(patient));
                }
            }
        }
        Commands::Show { id } => {
            let patient = service.get(&id)?;
            println!("{}: {}", id, describe(&patient));
        }
        Commands::Sort { sort_by, order } => {
            for patient in service.sort(&sort_by, Some(order.as_str()))? {
                println!("{}", describe(&patient));
            }
        }
        Commands::Create {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } => {
            let input = PatientInput {
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            service.create(&id, input)?;
            println!("Patient created successfully: {}", id);
        }
        Commands::Update {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } => {
            let update = PatientUpdate {
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            if update.is_empty() {
                println!("Nothing to update for {}", id);
                return Ok(());
            }
            service.update(&id, update)?;
            println!("Patient updated successfully: {}", id);
        }
        Commands::Delete { id } => {
            service.delete(&id)?;
            println!("Patient deleted successfully: {}", id);
        }
    }

    Ok(())
}

fn describe(patient: &Patient) -> String {
    format!(
        "{}, {}, age {}, {}, {} m, {} kg, BMI {} ({})",
        patient.name(),
        patient.city(),
        patient.age(),
        patient.gender(),
        patient.height(),
        patient.weight(),
        patient.bmi(),
        patient.verdict()
    )
}
