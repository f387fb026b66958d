//! Lowers typed Gateway API resources into the core model.
//!
//! Defaulting rules live here, since this is the layer that sees the raw
//! optional fields: an omitted path match type means `PathPrefix`, an omitted
//! header match type means `Exact`, and unset backendRef fields are carried
//! through unset.

use gateway_console_core::routes as model;
use gateway_console_k8s_api::{gateway, httproute, ResourceExt, Service};

pub fn route(route: httproute::HttpRoute) -> model::Route {
    let namespace = route.namespace().expect("HTTPRoute must have a namespace");
    let name = route.name_unchecked();
    let httproute::HttpRoute { spec, status, .. } = route;

    let status_conditions = status
        .map(|status| {
            status
                .parents
                .into_iter()
                .flat_map(|parent| parent.conditions.unwrap_or_default())
                .map(|condition| model::Condition::new(condition.type_, condition.status))
                .collect()
        })
        .unwrap_or_default();

    model::Route {
        name,
        namespace,
        hostnames: spec.hostnames.unwrap_or_default(),
        parent_refs: spec
            .parent_refs
            .into_iter()
            .flatten()
            .map(parent_ref)
            .collect(),
        rules: spec.rules.into_iter().flatten().map(rule).collect(),
        status_conditions,
    }
}

fn parent_ref(
    httproute::ParentReference {
        name, namespace, ..
    }: httproute::ParentReference,
) -> model::ParentRef {
    model::ParentRef { name, namespace }
}

fn rule(rule: httproute::HttpRouteRule) -> model::RouteRule {
    model::RouteRule {
        matches: rule
            .matches
            .into_iter()
            .flatten()
            .map(route_match)
            .collect(),
        backend_refs: rule
            .backend_refs
            .into_iter()
            .flatten()
            .map(backend_ref)
            .collect(),
    }
}

fn route_match(route_match: httproute::HttpRouteMatch) -> model::RouteMatch {
    model::RouteMatch {
        path: route_match.path.and_then(path_match),
        method: route_match.method,
        headers: route_match
            .headers
            .into_iter()
            .flatten()
            .map(header_match)
            .collect(),
    }
}

fn path_match(path: httproute::HttpPathMatch) -> Option<model::PathMatch> {
    let value = path.value?;
    Some(match path.type_ {
        Some(httproute::PathMatchType::Exact) => model::PathMatch::Exact(value),
        Some(httproute::PathMatchType::RegularExpression) => model::PathMatch::Regex(value),
        Some(httproute::PathMatchType::PathPrefix) | None => model::PathMatch::Prefix(value),
    })
}

fn header_match(header: httproute::HttpHeaderMatch) -> model::HeaderMatch {
    match header.type_ {
        Some(httproute::HeaderMatchType::RegularExpression) => {
            model::HeaderMatch::Regex(header.name, header.value)
        }
        Some(httproute::HeaderMatchType::Exact) | None => {
            model::HeaderMatch::Exact(header.name, header.value)
        }
    }
}

fn backend_ref(
    httproute::HttpBackendRef {
        group,
        kind,
        name,
        namespace,
        port,
        weight,
    }: httproute::HttpBackendRef,
) -> model::BackendRef {
    model::BackendRef {
        name,
        group,
        kind,
        namespace,
        port,
        weight,
    }
}

pub fn gateway(gateway: gateway::Gateway) -> model::Gateway {
    let namespace = gateway.namespace().expect("Gateway must have a namespace");
    let name = gateway.name_unchecked();
    let gateway::Gateway { spec, status, .. } = gateway;

    let (addresses, conditions) = status
        .map(|status| {
            (
                status
                    .addresses
                    .into_iter()
                    .flatten()
                    .map(|address| address.value)
                    .collect(),
                status
                    .conditions
                    .unwrap_or_default()
                    .into_iter()
                    .map(|condition| model::Condition::new(condition.type_, condition.status))
                    .collect(),
            )
        })
        .unwrap_or_default();

    model::Gateway {
        name,
        namespace,
        class_name: spec.gateway_class_name,
        addresses,
        conditions,
    }
}

pub fn service(service: Service) -> model::Service {
    let namespace = service.namespace().expect("Service must have a namespace");
    let name = service.name_unchecked();
    let spec = service.spec.unwrap_or_default();

    model::Service {
        name,
        namespace,
        cluster_ip: spec.cluster_ip,
        type_: spec.type_,
    }
}
