use crate::infra::candidate_repository;
use clap::Args;
use hireflow::config::StoreConfig;
use hireflow::error::AppError;
use hireflow::workflows::candidates::{
    CandidateId, CandidateRepository, CandidateService, CandidateServiceError, CandidateView,
    DecisionAction, ErrorCode,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Additional candidate names to create before decisions are applied.
    #[arg(long = "add", value_name = "NAME")]
    pub(crate) additional: Vec<String>,
    /// Print the final roster only.
    #[arg(long)]
    pub(crate) quiet: bool,
}

/// Outcome of a single scripted step.
#[derive(Debug)]
pub(crate) enum StepOutcome {
    Applied(CandidateView),
    Refused { code: ErrorCode, message: String },
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(candidate_repository(&StoreConfig { seed_demo: true }));
    let service = CandidateService::new(repository);

    let steps = demo_steps(&service, &args.additional)?;
    if !args.quiet {
        println!("Candidate decision walkthrough");
        for (label, outcome) in &steps {
            match outcome {
                StepOutcome::Applied(view) => {
                    println!("- {label}: {} ({}) -> {}", view.name, view.id, view.status)
                }
                StepOutcome::Refused { code, message } => {
                    println!("- {label}: refused [{}] {message}", code.label())
                }
            }
        }
    }

    println!("\nFinal roster");
    for view in service.list_candidates()? {
        println!("- {} | {} | {}", view.id, view.name, view.status);
    }

    Ok(())
}

pub(crate) fn demo_steps<R>(
    service: &CandidateService<R>,
    additional: &[String],
) -> Result<Vec<(String, StepOutcome)>, AppError>
where
    R: CandidateRepository + 'static,
{
    let mut steps = Vec::new();

    for name in additional {
        let outcome = record(service.create_candidate(name))?;
        steps.push((format!("create '{name}'"), outcome));
    }

    let script: [(&str, DecisionAction, &str); 5] = [
        ("c_1", DecisionAction::Shortlist, "Strong technical background"),
        ("c_2", DecisionAction::Reject, "Does not meet the minimum requirements"),
        ("c_2", DecisionAction::Shortlist, "Actually reconsidering this candidate"),
        ("c_1", DecisionAction::Reject, "Too short"),
        ("c_999", DecisionAction::Shortlist, "Strong technical background"),
    ];

    for (id, action, reason) in script {
        let outcome = record(service.apply_decision(&CandidateId::from(id), action, reason))?;
        steps.push((format!("{action} {id}"), outcome));
    }

    Ok(steps)
}

/// Domain refusals are part of the walkthrough; anything else aborts it.
fn record(result: Result<CandidateView, CandidateServiceError>) -> Result<StepOutcome, AppError> {
    match result {
        Ok(view) => Ok(StepOutcome::Applied(view)),
        Err(CandidateServiceError::Candidate(err)) => Ok(StepOutcome::Refused {
            code: err.code(),
            message: err.to_string(),
        }),
        Err(other) => Err(other.into()),
    }
}
