//! Call-site locator.
//!
//! Scans a compiled unit for invocations of the tracked SQL client APIs and
//! maps each one's arguments to declared field/parameter names. Recognition
//! is purely nominal, by the fully-qualified callee symbol, so argument
//! order, named-vs-positional style, and optional-argument omission do not
//! affect matching. Calls nested inside argument lists are walked too, which
//! is how OUT-parameter constructors inside a procedure-call statement are
//! found.

use serde::Serialize;
use sqlcop_core::{Argument, CompiledUnit, NodeId, NodeKind, SemanticModel, SourceSpan};
use tracing::{debug, warn};

/// Which tracked API a call site belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApiKind {
    /// Connection-pool configuration passed to a client constructor.
    ClientInit,
    /// A stored-procedure OUT-parameter constructor.
    OutParameter(OutParamKind),
    /// A stored-procedure call statement. Carries no rules of its own; it is
    /// tracked so OUT parameters nested in its argument list are located.
    ProcedureCall,
}

/// The SQL column-type category of an OUT-parameter constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutParamKind {
    Char,
    Varchar,
    Text,
    Time,
}

/// One recognized API invocation with its arguments resolved to declared
/// field names. Lives only for the duration of one unit's rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    /// Which API was invoked.
    pub api: ApiKind,
    /// Location of the call expression.
    pub span: SourceSpan,
    /// (declared field name, argument node) pairs, in declared-field order.
    pub args: Vec<(String, NodeId)>,
}

impl CallSite {
    /// The argument supplied for a declared field, if any.
    pub fn argument(&self, field: &str) -> Option<NodeId> {
        self.args
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, id)| *id)
    }
}

/// Fully-qualified symbols of the tracked APIs, with their declared
/// parameter names in declaration order (the positional fallback order).
fn classify(symbol: &str) -> Option<(ApiKind, &'static [&'static str])> {
    match symbol {
        "sql:ConnectionPool" => Some((
            ApiKind::ClientInit,
            &[
                "maxOpenConnections",
                "maxConnectionLifeTime",
                "minIdleConnections",
            ],
        )),
        "sql:CharOutParameter" => Some((
            ApiKind::OutParameter(OutParamKind::Char),
            &["bindingType"],
        )),
        "sql:VarcharOutParameter" => Some((
            ApiKind::OutParameter(OutParamKind::Varchar),
            &["bindingType"],
        )),
        "sql:TextOutParameter" => Some((
            ApiKind::OutParameter(OutParamKind::Text),
            &["bindingType"],
        )),
        "sql:TimeOutParameter" => Some((
            ApiKind::OutParameter(OutParamKind::Time),
            &["bindingType"],
        )),
        "sql:Client.call" => Some((ApiKind::ProcedureCall, &["sqlQuery"])),
        _ => None,
    }
}

/// Locate all tracked call sites in one compiled unit, in source order by
/// span start. Restartable: calling again walks the unit afresh. A unit
/// with no recognized call yields an empty sequence.
pub fn locate(model: &SemanticModel, unit: &CompiledUnit) -> impl Iterator<Item = CallSite> {
    let mut sites = Vec::new();
    for root in &unit.roots {
        walk(model, *root, &mut sites);
    }
    sites.sort_by(|a, b| a.span.cmp(&b.span));
    sites.into_iter()
}

/// Depth-first walk over one expression tree, collecting recognized calls.
fn walk(model: &SemanticModel, id: NodeId, sites: &mut Vec<CallSite>) {
    let node = match model.node(id) {
        Ok(node) => node,
        Err(error) => {
            // Host-contract violation; skip this construct, keep the pass alive.
            warn!(%error, "skipping unresolvable expression node");
            return;
        }
    };

    if let NodeKind::Call { symbol, args } = &node.kind {
        if let Some(site) = recognize(model, symbol, args, &node.span) {
            debug!(symbol, span = %site.span, "recognized call site");
            sites.push(site);
        }
        for arg in args {
            walk(model, arg.value, sites);
        }
    }
}

/// Classify one call expression and map its arguments to declared fields.
/// Returns `None` for untracked symbols and for malformed sites whose
/// argument nodes do not resolve.
fn recognize(
    model: &SemanticModel,
    symbol: &str,
    args: &[Argument],
    span: &SourceSpan,
) -> Option<CallSite> {
    let (api, params) = classify(symbol)?;

    for arg in args {
        if let Err(error) = model.node(arg.value) {
            warn!(%error, symbol, span = %span, "skipping malformed call site");
            return None;
        }
    }

    // Named arguments win; remaining positional arguments fill the still
    // unassigned parameters in declaration order.
    let mut positional = args.iter().filter(|arg| arg.name.is_none());
    let mut mapped = Vec::with_capacity(params.len());
    for param in params {
        let node = args
            .iter()
            .find(|arg| arg.name.as_deref() == Some(*param))
            .or_else(|| positional.next())
            .map(|arg| arg.value);
        if let Some(node) = node {
            mapped.push(((*param).to_string(), node));
        }
    }

    Some(CallSite {
        api,
        span: span.clone(),
        args: mapped,
    })
}
