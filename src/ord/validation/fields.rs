//! # Field Validation
//!
//! Validators for single fields and for the free-form JSON attributes ORD
//! resources carry. Absent optional values are always valid.

use crate::constants::MAX_SHORT_DESCRIPTION_LENGTH;
use crate::ord::model::{AccessStrategy, ResourceDefinition};
use crate::ord::validation::patterns::{
    ACCESS_STRATEGY_TYPES, COUNTRY, CUSTOM_TYPE, EXTENSIBLE_SUPPORT, LABELS_KEY,
    POLICY_LEVEL_SAP, POLICY_LEVEL_SAP_PARTNER, RELEASE_STATUSES, SEMVER,
};
use anyhow::{anyhow, bail, Result};
use regex::Regex;
use reqwest::Url;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Absolute URI or absolute path
pub fn is_request_uri(value: &str) -> bool {
    if value.starts_with('/') {
        return !value.chars().any(char::is_whitespace);
    }
    Url::parse(value).is_ok()
}

pub fn required(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("cannot be blank");
    }
    Ok(())
}

pub fn required_opt(value: Option<&str>) -> Result<()> {
    required(value.unwrap_or_default())
}

pub fn matches(value: &str, pattern: &Regex) -> Result<()> {
    if !pattern.is_match(value) {
        bail!("{value:?} must match {:?}", pattern.as_str());
    }
    Ok(())
}

pub fn required_match(value: &str, pattern: &Regex) -> Result<()> {
    required(value)?;
    matches(value, pattern)
}

pub fn one_of(value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        bail!("{value:?} must be one of {allowed:?}");
    }
    Ok(())
}

pub fn required_one_of(value: Option<&str>, allowed: &[&str]) -> Result<()> {
    let value = value.unwrap_or_default();
    required(value)?;
    one_of(value, allowed)
}

pub fn semver(value: &str) -> Result<()> {
    required(value)?;
    matches(value, &SEMVER)
}

pub fn short_description(value: &str) -> Result<()> {
    required(value)?;
    no_line_breaks(value)?;
    let length = value.chars().count();
    if length > MAX_SHORT_DESCRIPTION_LENGTH {
        bail!("must be at most {MAX_SHORT_DESCRIPTION_LENGTH} characters long (got {length})");
    }
    Ok(())
}

pub fn no_line_breaks(value: &str) -> Result<()> {
    if value.contains('\n') {
        bail!("should not contain line breaks");
    }
    Ok(())
}

/// RFC 3339 timestamp such as sunset and removal dates
pub fn rfc3339(value: &str) -> Result<()> {
    required(value)?;
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|e| anyhow!("{value:?} is not a valid RFC 3339 date: {e}"))
}

fn non_empty_array(value: &Value) -> Result<&Vec<Value>> {
    let items = value
        .as_array()
        .ok_or_else(|| anyhow!("should be a json array"))?;
    if items.is_empty() {
        bail!("the json array should not be empty");
    }
    Ok(items)
}

fn string_items(value: &Value) -> Result<Vec<&str>> {
    non_empty_array(value)?
        .iter()
        .map(|item| item.as_str().ok_or_else(|| anyhow!("should be array of strings")))
        .collect()
}

pub fn string_array_matching(value: Option<&Value>, pattern: &Regex) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    for item in string_items(value)? {
        if !pattern.is_match(item) {
            bail!("elements should match {:?}", pattern.as_str());
        }
    }
    Ok(())
}

pub fn string_array_in(value: Option<&Value>, allowed: &[&str]) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    for item in string_items(value)? {
        if !allowed.contains(&item) {
            bail!("{item:?} is not in the list of valid values");
        }
    }
    Ok(())
}

pub fn countries(value: Option<&Value>) -> Result<()> {
    string_array_matching(value, &COUNTRY)
}

pub fn labels(value: Option<&Value>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let labels = value
        .as_object()
        .ok_or_else(|| anyhow!("labels should be json object"))?;
    for (key, values) in labels {
        if !LABELS_KEY.is_match(key) {
            bail!("label key {key:?} must match {:?}", LABELS_KEY.as_str());
        }
        let values = values
            .as_array()
            .ok_or_else(|| anyhow!("label value should be array"))?;
        if values.iter().any(|v| !v.is_string()) {
            bail!("label value should be array of strings");
        }
    }
    Ok(())
}

/// Validate every object in a JSON array with the given element check
fn array_of_objects(
    value: Option<&Value>,
    check: impl Fn(&Map<String, Value>) -> Result<()>,
) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    for item in non_empty_array(value)? {
        let object = item
            .as_object()
            .ok_or_else(|| anyhow!("should be array of objects"))?;
        check(object)?;
    }
    Ok(())
}

fn str_field<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    object.get(field).and_then(Value::as_str)
}

fn required_uri_field(object: &Map<String, Value>, field: &str) -> Result<()> {
    let url = str_field(object, field).unwrap_or_default();
    required(url).map_err(|e| anyhow!("error validating field {field}: {e}"))?;
    if !is_request_uri(url) {
        bail!("error validating field {field}: {url:?} must be a valid URI");
    }
    Ok(())
}

fn optional_uri_field(object: &Map<String, Value>, field: &str) -> Result<()> {
    match str_field(object, field) {
        Some(url) if !url.is_empty() && !is_request_uri(url) => {
            bail!("error validating field {field}: {url:?} must be a valid URI")
        }
        _ => Ok(()),
    }
}

fn custom_type_only_with_custom(object: &Map<String, Value>) -> Result<()> {
    if object.contains_key("customType") && str_field(object, "type") != Some("custom") {
        bail!("if customType is provided, type should be set to 'custom'");
    }
    Ok(())
}

/// Generic `links`: a title and a URL per entry
pub fn links(value: Option<&Value>) -> Result<()> {
    array_of_objects(value, |link| {
        required(str_field(link, "title").unwrap_or_default())
            .map_err(|e| anyhow!("error validating field title: {e}"))?;
        required_uri_field(link, "url")
    })
}

/// Links restricted to a set of `type` values
pub fn typed_links(value: Option<&Value>, allowed_types: &[&str]) -> Result<()> {
    array_of_objects(value, |link| {
        required_one_of(str_field(link, "type"), allowed_types)
            .map_err(|e| anyhow!("error validating field type: {e}"))?;
        required_uri_field(link, "url")?;
        custom_type_only_with_custom(link)
    })
}

pub fn changelog_entries(value: Option<&Value>) -> Result<()> {
    array_of_objects(value, |entry| {
        semver(str_field(entry, "version").unwrap_or_default())
            .map_err(|e| anyhow!("error validating field version: {e}"))?;
        required_one_of(str_field(entry, "releaseStatus"), RELEASE_STATUSES)
            .map_err(|e| anyhow!("error validating field releaseStatus: {e}"))?;
        let date = str_field(entry, "date").unwrap_or_default();
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| anyhow!("error validating field date: {date:?} {e}"))?;
        optional_uri_field(entry, "url")
    })
}

pub fn credential_exchange_strategies(value: Option<&Value>) -> Result<()> {
    array_of_objects(value, |strategy| {
        required_one_of(str_field(strategy, "type"), &["custom"])
            .map_err(|e| anyhow!("error validating field type: {e}"))?;
        optional_uri_field(strategy, "callbackUrl")?;
        custom_type_only_with_custom(strategy)?;
        if let Some(custom_type) = str_field(strategy, "customType") {
            matches(custom_type, &CUSTOM_TYPE)?;
        }
        if strategy.contains_key("customDescription") && str_field(strategy, "type") != Some("custom") {
            bail!("if customDescription is provided, type should be set to 'custom'");
        }
        Ok(())
    })
}

/// `extensible` is mandatory for SAP and partner policy levels
pub fn extensible(value: Option<&Value>, policy_level: Option<&str>) -> Result<()> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        if matches!(policy_level, Some(POLICY_LEVEL_SAP | POLICY_LEVEL_SAP_PARTNER)) {
            bail!(
                "`extensible` field must be provided when `policyLevel` is either `{POLICY_LEVEL_SAP}` or `{POLICY_LEVEL_SAP_PARTNER}`"
            );
        }
        return Ok(());
    };

    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("should be json object"))?;
    let supported = str_field(object, "supported").ok_or_else(|| anyhow!("`supported` value not provided"))?;
    one_of(supported, EXTENSIBLE_SUPPORT)?;
    let description = str_field(object, "description").unwrap_or_default();
    if matches!(supported, "manual" | "automatic") && description.is_empty() {
        bail!("if supported is either 'manual' or 'automatic', description should be provided");
    }
    Ok(())
}

pub fn entry_points(value: Option<&[String]>) -> Result<()> {
    let Some(entry_points) = value else {
        return Ok(());
    };
    if entry_points.is_empty() {
        bail!("entryPoints should not be empty if present");
    }
    let unique: HashSet<&String> = entry_points.iter().collect();
    if unique.len() != entry_points.len() {
        bail!("entryPoints should not contain duplicates");
    }
    if let Some(bad) = entry_points.iter().find(|url| !is_request_uri(url)) {
        bail!("entryPoint {bad:?} should be a valid URI");
    }
    Ok(())
}

fn access_strategy(strategy: &AccessStrategy) -> Result<()> {
    required_one_of(Some(strategy.strategy_type.as_str()), ACCESS_STRATEGY_TYPES)
        .map_err(|e| anyhow!("error validating access strategy type: {e}"))?;
    if strategy.custom_type.is_some() && strategy.strategy_type != "custom" {
        bail!("if customType is provided, type should be set to 'custom'");
    }
    if strategy.custom_description.is_some() && strategy.strategy_type != "custom" {
        bail!("if customDescription is provided, type should be set to 'custom'");
    }
    Ok(())
}

/// Shape of each definition; mandatory-ness is decided by the caller
pub fn resource_definitions(definitions: &[ResourceDefinition]) -> Result<()> {
    for definition in definitions {
        required(&definition.definition_type)
            .map_err(|e| anyhow!("error validating field type: {e}"))?;
        if definition.custom_type.is_some() && definition.definition_type != "custom" {
            bail!("if customType is provided, type should be set to 'custom'");
        }
        required(&definition.media_type)
            .map_err(|e| anyhow!("error validating field mediaType: {e}"))?;
        required(&definition.url).map_err(|e| anyhow!("error validating field url: {e}"))?;
        if !is_request_uri(&definition.url) {
            bail!("error validating field url: {:?} must be a valid URI", definition.url);
        }
        if definition.access_strategies.is_empty() {
            bail!("accessStrategies should not be empty");
        }
        definition
            .access_strategies
            .iter()
            .try_for_each(access_strategy)?;
    }
    Ok(())
}
