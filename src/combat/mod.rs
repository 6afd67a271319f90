pub mod context;
pub mod evaluator;
pub mod orchestrator;
pub mod report;
pub mod selection;

pub use context::AttackContext;
pub use evaluator::{
    effective_save, evaluate, evaluate_resolved, evaluate_volley, feel_no_pain, roll_chance,
    save_fail_chance, wound_threshold,
};
pub use orchestrator::{AttackPhase, UnitAttack};
pub use report::{AttackReport, Contribution, DeclaredAttack, ReportSummary};
pub use selection::select_effects;
