//! RapidQL (axios request options).

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::body::BodyFamily;
use crate::prepare::PreparedRequest;
use crate::targets::{ClientInfo, CodeBuilder, RenderOptions, Renderer};

/// Objects whose one-line form fits in this many columns stay on one line.
const INLINE_LIMIT: usize = 80;

#[derive(Debug, Clone, Copy, Default)]
pub struct RapidQl;

impl RapidQl {
    pub fn info() -> ClientInfo {
        ClientInfo::new("rapidql", "RapidQL").with_link("https://github.com/RapidAPI/rapidql")
    }
}

impl Renderer for RapidQl {
    fn render(&self, source: &PreparedRequest, options: &RenderOptions) -> String {
        let indent = options.indent();
        let mut code = CodeBuilder::new(indent);

        code.push("var axios = require(\"axios\").default;").blank();

        let mut req_opts = Map::new();
        req_opts.insert("method".into(), Value::String(source.method.clone()));
        req_opts.insert("url".into(), Value::String(source.url.clone()));
        if !source.query_obj.is_empty() {
            req_opts.insert("params".into(), string_map(&source.query_obj));
        }
        if !source.all_headers.is_empty() {
            req_opts.insert("headers".into(), string_map(&source.all_headers));
        }

        let post = &source.post_data;
        let data = match post.family() {
            BodyFamily::FormUrlEncoded => post.params_obj.as_ref().map(string_map),
            BodyFamily::Json if post.json_obj.is_some() => post.json_obj.clone(),
            _ if !post.text.is_empty() => Some(Value::String(post.text.clone())),
            _ => None,
        };
        if let Some(data) = data {
            req_opts.insert("data".into(), data);
        }

        code.push(format!(
            "var options = {};",
            js_literal(&Value::Object(req_opts), indent, 0)
        ))
        .blank();

        code.push("axios.request(options).then(function (response) {")
            .push_indented(1, "console.log(response.data);")
            .push("}).catch(function (error) {")
            .push_indented(1, "console.error(error);")
            .push("});");

        code.join()
    }
}

fn string_map(map: &IndexMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// JavaScript object literal: single-quoted strings, bare identifier keys,
/// one line when short enough.
fn js_literal(value: &Value, indent: &str, level: usize) -> String {
    let inline = js_inline(value);
    if indent.len() * level + inline.len() <= INLINE_LIMIT {
        return inline;
    }
    let pad = indent.repeat(level + 1);
    let close = indent.repeat(level);
    match value {
        Value::Object(map) if !map.is_empty() => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}{}: {}", pad, js_key(k), js_literal(v, indent, level + 1)))
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), close)
        }
        Value::Array(list) if !list.is_empty() => {
            let items: Vec<String> = list
                .iter()
                .map(|v| format!("{}{}", pad, js_literal(v, indent, level + 1)))
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), close)
        }
        _ => inline,
    }
}

fn js_inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => js_string(s),
        Value::Array(list) => {
            let items: Vec<String> = list.iter().map(js_inline).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", js_key(k), js_inline(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        key.to_string()
    } else {
        js_string(key)
    }
}

fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
