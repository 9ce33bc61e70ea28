//! Bundled borrows for one analysis request.

use aster_sema::{LookupService, ScopeId, SourceUnit, TypecheckService};

/// Everything one completion request operates over: the source unit, the
/// collaborator services, and the scope the hole lives in.
///
/// Constructed fresh per request and discarded with it; no analysis state
/// survives across requests.
pub struct AnalysisEnv<'a> {
    pub unit: &'a mut SourceUnit,
    pub typeck: &'a mut dyn TypecheckService,
    pub lookup: &'a dyn LookupService,
    pub scope: ScopeId,
}
