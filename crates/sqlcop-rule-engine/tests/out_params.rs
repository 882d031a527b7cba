//! Integration tests for stored-procedure OUT-parameter binding validation.

use pretty_assertions::assert_eq;
use sqlcop_core::{Argument, ModelBuilder, NodeId, NodeKind, Severity, SourceSpan};
use sqlcop_rule_engine::SqlUsageAnalyzer;

fn span(line: u32, column: u32) -> SourceSpan {
    SourceSpan::new("main.bal", line, column)
}

fn out_parameter(
    builder: &mut ModelBuilder,
    symbol: &str,
    binding: &str,
    line: u32,
) -> NodeId {
    let ty = builder.node(NodeKind::TypeRef(binding.into()), span(line, 40));
    builder.node(
        NodeKind::Call {
            symbol: symbol.into(),
            args: vec![Argument::positional(ty)],
        },
        span(line, 9),
    )
}

fn procedure_call(builder: &mut ModelBuilder, line: u32, out_params: Vec<NodeId>) -> NodeId {
    let query = builder.node(NodeKind::Opaque, span(line, 30));
    let mut args = vec![Argument::positional(query)];
    args.extend(out_params.into_iter().map(Argument::positional));
    builder.node(
        NodeKind::Call {
            symbol: "sql:Client.call".into(),
            args,
        },
        span(line, 5),
    )
}

#[test]
fn test_incompatible_char_and_time_bindings_report_two_errors() {
    let mut builder = sqlcop_core::SemanticModel::builder();
    let char_param = out_parameter(&mut builder, "sql:CharOutParameter", "int", 11);
    let time_param = out_parameter(&mut builder, "sql:TimeOutParameter", "time:Civil", 12);
    let call = procedure_call(&mut builder, 10, vec![char_param, time_param]);
    builder.unit("main.bal", vec![call]);

    let diagnostics = SqlUsageAnalyzer::new().analyze(&builder.finish());
    assert_eq!(diagnostics.len(), 2);

    assert_eq!(diagnostics[0].code, "SQL_211");
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(
        diagnostics[0].message,
        "invalid value: expected value is either string or json"
    );
    assert_eq!(diagnostics[0].span, span(11, 40));

    assert_eq!(diagnostics[1].code, "SQL_223");
    assert_eq!(diagnostics[1].severity, Severity::Error);
    assert_eq!(
        diagnostics[1].message,
        "invalid value: expected value is any one of time:TimeOfDay, int or string"
    );
    assert_eq!(diagnostics[1].span, span(12, 40));
}

#[test]
fn test_compatible_bindings_pass() {
    let mut builder = sqlcop_core::SemanticModel::builder();
    let mut params = Vec::new();
    for (line, symbol, binding) in [
        (11, "sql:CharOutParameter", "string"),
        (12, "sql:CharOutParameter", "json"),
        (13, "sql:TimeOutParameter", "time:TimeOfDay"),
        (14, "sql:TimeOutParameter", "int"),
        (15, "sql:TimeOutParameter", "string"),
    ] {
        params.push(out_parameter(&mut builder, symbol, binding, line));
    }
    let call = procedure_call(&mut builder, 10, params);
    builder.unit("main.bal", vec![call]);

    assert!(SqlUsageAnalyzer::new().analyze(&builder.finish()).is_empty());
}

#[test]
fn test_each_character_constructor_has_its_own_code() {
    let mut builder = sqlcop_core::SemanticModel::builder();
    let varchar = out_parameter(&mut builder, "sql:VarcharOutParameter", "xml", 11);
    let text = out_parameter(&mut builder, "sql:TextOutParameter", "int", 12);
    let call = procedure_call(&mut builder, 10, vec![varchar, text]);
    builder.unit("main.bal", vec![call]);

    let diagnostics = SqlUsageAnalyzer::new().analyze(&builder.finish());
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["SQL_212", "SQL_213"]);
    // Same accepted set, same message, distinct codes.
    assert!(diagnostics
        .iter()
        .all(|d| d.message == "invalid value: expected value is either string or json"));
}

#[test]
fn test_out_parameter_outside_a_procedure_call_is_still_checked() {
    let mut builder = sqlcop_core::SemanticModel::builder();
    let param = out_parameter(&mut builder, "sql:TimeOutParameter", "boolean", 7);
    builder.unit("main.bal", vec![param]);

    let diagnostics = SqlUsageAnalyzer::new().analyze(&builder.finish());
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["SQL_223"]);
}

#[test]
fn test_statically_unknown_binding_passes_silently() {
    let mut builder = sqlcop_core::SemanticModel::builder();
    // Binding type computed through a shape the evaluator does not model.
    let unknown = builder.node(NodeKind::Opaque, span(11, 40));
    let param = builder.node(
        NodeKind::Call {
            symbol: "sql:CharOutParameter".into(),
            args: vec![Argument::positional(unknown)],
        },
        span(11, 9),
    );
    let call = procedure_call(&mut builder, 10, vec![param]);
    builder.unit("main.bal", vec![call]);

    assert!(SqlUsageAnalyzer::new().analyze(&builder.finish()).is_empty());
}
