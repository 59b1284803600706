//! Utility types the resolver understands without a declaration.

use swc_common::Spanned;
use swc_ecma_ast::{
    Callee, Expr, Lit, MemberProp, ObjectLit, Prop, PropName, PropOrSpread, TsEntityName, TsLit, TsType,
    TsTypeQueryExpr, TsUnionOrIntersectionType,
};

use super::{MemberSite, ResolvedMember, Stack, TypeResolver};
use crate::core::project::FileId;
use crate::core::symbols::DeclNode;

pub(super) fn is_utility(name: &str) -> bool {
    matches!(
        name,
        "Partial" | "Required" | "Readonly" | "Omit" | "Pick" | "VariantProps"
    )
}

pub(super) fn utility_members<'a>(
    resolver: &TypeResolver<'_, 'a>,
    name: &str,
    args: &'a [Box<TsType>],
    file: FileId,
    stack: &mut Stack,
) -> Vec<ResolvedMember> {
    match (name, args) {
        ("Partial", [target]) => with_optional(resolver.type_members(target, file, stack), true),
        ("Required", [target]) => with_optional(resolver.type_members(target, file, stack), false),
        ("Readonly", [target]) => resolver.type_members(target, file, stack),
        ("Omit", [target, keys]) => {
            let mut members = resolver.type_members(target, file, stack);
            if let Some(keys) = literal_keys(keys) {
                members.retain(|m| !keys.contains(&m.name));
            }
            members
        }
        ("Pick", [target, keys]) => {
            let Some(keys) = literal_keys(keys) else {
                return Vec::new();
            };
            let mut members = resolver.type_members(target, file, stack);
            members.retain(|m| keys.contains(&m.name));
            members
        }
        ("VariantProps", [query]) => variant_members(resolver, query, file),
        _ => Vec::new(),
    }
}

fn with_optional(mut members: Vec<ResolvedMember>, optional: bool) -> Vec<ResolvedMember> {
    for site in members.iter_mut().flat_map(|m| m.sites.iter_mut()) {
        site.optional = optional;
    }
    members
}

/// Key names of a string literal type or a union of them.
fn literal_keys(ty: &TsType) -> Option<Vec<String>> {
    match ty {
        TsType::TsLitType(lit) => match &lit.lit {
            TsLit::Str(s) => Some(vec![s.value.to_string_lossy().into_owned()]),
            _ => None,
        },
        TsType::TsParenthesizedType(paren) => literal_keys(&paren.type_ann),
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
            let mut keys = Vec::new();
            for part in &union.types {
                keys.extend(literal_keys(part)?);
            }
            Some(keys)
        }
        _ => None,
    }
}

/// `VariantProps<typeof buttonVariants>` where `buttonVariants` is a
/// `cva(base, { variants: { ... } })` call: one optional member per variant.
fn variant_members<'a>(
    resolver: &TypeResolver<'_, 'a>,
    query: &TsType,
    file: FileId,
) -> Vec<ResolvedMember> {
    let TsType::TsTypeQuery(query) = query else {
        return Vec::new();
    };
    let TsTypeQueryExpr::TsEntityName(TsEntityName::Ident(ident)) = &query.expr_name else {
        return Vec::new();
    };

    for decl in resolver.index.resolve_name(file, &ident.sym) {
        let DeclNode::Variable(declarator) = decl.node else {
            continue;
        };
        let Some(variants) = declarator.init.as_deref().and_then(cva_variants) else {
            continue;
        };
        return variants
            .props
            .iter()
            .filter_map(|prop| {
                let PropOrSpread::Prop(prop) = prop else {
                    return None;
                };
                let Prop::KeyValue(kv) = &**prop else {
                    return None;
                };
                let name = prop_name(&kv.key)?;
                Some(ResolvedMember {
                    name,
                    sites: vec![MemberSite {
                        file: decl.file,
                        optional: true,
                        type_text: format!("{} | null | undefined", option_union(&kv.value)),
                        doc_pos: kv.key.span().lo,
                    }],
                })
            })
            .collect();
    }

    Vec::new()
}

/// The `variants` object of a `cva(...)` call.
fn cva_variants(expr: &Expr) -> Option<&ObjectLit> {
    let Expr::Call(call) = expr else {
        return None;
    };
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let is_cva = match &**callee {
        Expr::Ident(ident) => &*ident.sym == "cva",
        Expr::Member(member) => matches!(&member.prop, MemberProp::Ident(p) if &*p.sym == "cva"),
        _ => false,
    };
    if !is_cva {
        return None;
    }

    let Expr::Object(config) = &*call.args.get(1)?.expr else {
        return None;
    };
    config.props.iter().find_map(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        let Prop::KeyValue(kv) = &**prop else {
            return None;
        };
        match (prop_name(&kv.key)?.as_str(), &*kv.value) {
            ("variants", Expr::Object(variants)) => Some(variants),
            _ => None,
        }
    })
}

/// `{ default: ..., destructive: ... }` renders as `"default" | "destructive"`;
/// `true`/`false` options render as `boolean`.
fn option_union(options: &Expr) -> String {
    let Expr::Object(options) = options else {
        return "string".to_string();
    };
    let names: Vec<String> = options
        .props
        .iter()
        .filter_map(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => prop_name(&kv.key),
                _ => None,
            },
            PropOrSpread::Spread(_) => None,
        })
        .collect();

    if !names.is_empty() && names.iter().all(|n| n == "true" || n == "false") {
        return "boolean".to_string();
    }
    if names.is_empty() {
        return "never".to_string();
    }
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string_lossy().into_owned()),
        PropName::Num(n) => Some(n.value.to_string()),
        PropName::Computed(computed) => match &*computed.expr {
            Expr::Lit(Lit::Str(s)) => Some(s.value.to_string_lossy().into_owned()),
            _ => None,
        },
        PropName::BigInt(_) => None,
    }
}
