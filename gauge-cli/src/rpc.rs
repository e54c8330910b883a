//! Line-delimited JSON-RPC handling
//!
//! One request per input line, one response per output line. Requests
//! without an `id` member are notifications and get no response; an explicit
//! `"id": null` still gets one.

use std::io::{self, BufRead, Write};
use gauge_units::{
    compatible, convert, convert_query, convertible, describe, simplify, to_base, Dimension,
    Quantity, UNITS,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use crate::config::Config;
use crate::error::ToolError;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    /// `None` only when the member is absent
    #[serde(default, deserialize_with = "present")]
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl RpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        RpcError { code, message: message.into(), data: None }
    }
}

impl From<ToolError> for RpcError {
    fn from(err: ToolError) -> Self {
        RpcError {
            code: INVALID_PARAMS,
            message: err.to_string(),
            data: serde_json::to_value(&err).ok(),
        }
    }
}

impl Response {
    fn success(id: JsonValue, result: JsonValue) -> Self {
        Response { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    fn failure(id: JsonValue, error: RpcError) -> Self {
        Response { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

/// Read requests from `reader` until EOF, writing responses to `writer`
pub fn serve<R: BufRead, W: Write>(config: &Config, mut reader: R, mut writer: W) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "received request line");
                handle_line(config, line)
            }
            Err(e) => {
                warn!(error = %e, "request line is not valid UTF-8");
                Some(Response::failure(
                    JsonValue::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        };

        if let Some(response) = response {
            write_response(&mut writer, &response)?;
        }
    }

    info!("input closed");
    Ok(())
}

fn write_response<W: Write>(writer: &mut W, response: &Response) -> io::Result<()> {
    match serde_json::to_string(response) {
        Ok(json) => {
            writeln!(writer, "{}", json)?;
            writer.flush()
        }
        Err(e) => {
            error!(error = %e, "could not serialize response");
            Ok(())
        }
    }
}

/// Answer one line of input. Notifications yield `None`.
fn handle_line(config: &Config, line: &str) -> Option<Response> {
    let value: JsonValue = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "could not parse request");
            return Some(Response::failure(
                JsonValue::Null,
                RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    let request = match Request::deserialize(&value) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "malformed request");
            let id = value.get("id").cloned().unwrap_or(JsonValue::Null);
            return Some(Response::failure(
                id,
                RpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
            ));
        }
    };

    let response = handle_request(config, &request);
    if request.id.is_none() {
        debug!(method = %request.method, "notification processed (no response)");
        return None;
    }
    Some(response)
}

pub fn handle_request(config: &Config, request: &Request) -> Response {
    let id = request.id.clone().unwrap_or(JsonValue::Null);

    if request.jsonrpc != "2.0" {
        return Response::failure(
            id,
            RpcError::new(INVALID_REQUEST, format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
        );
    }

    info!(method = %request.method, "processing");

    let result = match request.method.as_str() {
        "ping" => Ok(json!({})),
        "units/list" => handle_units_list(&request.params),
        "convert" => handle_convert(config, &request.params),
        "simplify" => handle_simplify(config, &request.params),
        "to_base" => handle_to_base(config, &request.params),
        "compatible" => handle_compatible(&request.params),
        _ => Err(RpcError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
    };

    match result {
        Ok(r) => Response::success(id, r),
        Err(e) => Response::failure(id, e),
    }
}

fn params<T: DeserializeOwned>(method: &str, params: &Option<JsonValue>) -> Result<T, RpcError> {
    let value = params.clone().unwrap_or_else(|| json!({}));
    serde_json::from_value(value).map_err(|e| ToolError::invalid_params(method, e).into())
}

fn quantity_json(config: &Config, q: &Quantity) -> JsonValue {
    json!({
        "value": q.value,
        "unit": q.unit.symbol(),
        "dimension": q.dimension(),
        "display": config.display(q),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    dimension: Option<String>,
}

fn handle_units_list(raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: ListParams = params("units/list", raw)?;

    let units = match p.dimension {
        Some(name) => {
            let dimension = Dimension::from_name(&name).ok_or_else(|| {
                ToolError::invalid_params("units/list", format!("unknown dimension '{}'", name))
            })?;
            UNITS.by_dimension(dimension)
        }
        None => UNITS.all().to_vec(),
    };

    let listing: Vec<_> = units.iter().map(describe).collect();
    Ok(json!({ "units": listing }))
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    value: Option<f64>,
    from: Option<String>,
    to: Option<String>,
    query: Option<String>,
}

fn handle_convert(config: &Config, raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: ConvertParams = params("convert", raw)?;

    let result = match (p.query, p.value, p.from, p.to) {
        (Some(query), None, None, None) => convert_query(&query),
        (None, Some(value), Some(from), Some(to)) => convert(value, &from, &to),
        _ => {
            return Err(ToolError::invalid_params(
                "convert",
                "pass either {value, from, to} or {query}",
            ).into())
        }
    };

    let q = result.map_err(ToolError::from)?;
    Ok(quantity_json(config, &q))
}

#[derive(Debug, Deserialize)]
struct UnitValueParams {
    value: f64,
    unit: String,
}

fn handle_simplify(config: &Config, raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: UnitValueParams = params("simplify", raw)?;
    let q = simplify(p.value, &p.unit).map_err(ToolError::from)?;
    Ok(quantity_json(config, &q))
}

fn handle_to_base(config: &Config, raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: UnitValueParams = params("to_base", raw)?;
    let q = to_base(p.value, &p.unit).map_err(ToolError::from)?;
    Ok(quantity_json(config, &q))
}

#[derive(Debug, Deserialize)]
struct PairParams {
    a: String,
    b: String,
}

fn handle_compatible(raw: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let p: PairParams = params("compatible", raw)?;
    let same = compatible(&p.a, &p.b).map_err(ToolError::from)?;
    let bridged = convertible(&p.a, &p.b).map_err(ToolError::from)?;
    Ok(json!({ "compatible": same, "convertible": bridged }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn request(method: &str, params: JsonValue) -> Request {
        Request {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn call(method: &str, params: JsonValue) -> Response {
        handle_request(&Config::default(), &request(method, params))
    }

    #[test]
    fn test_ping() {
        let r = call("ping", json!({}));
        assert_eq!(r.result, Some(json!({})));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_convert_by_units() {
        let r = call("convert", json!({"value": 1, "from": "mi", "to": "ft"}));
        let result = r.result.unwrap();
        assert_eq!(result["value"], json!(5280.0));
        assert_eq!(result["unit"], json!("ft"));
        assert_eq!(result["dimension"], json!("imperial_distance"));
        assert_eq!(result["display"], json!("5280.0 ft"));
    }

    #[test]
    fn test_convert_by_query() {
        let r = call("convert", json!({"query": "1024 B to KB"}));
        let result = r.result.unwrap();
        assert_eq!(result["value"], json!(1.0));
        assert_eq!(result["unit"], json!("KB"));
    }

    #[test]
    fn test_convert_incompatible() {
        let r = call("convert", json!({"value": 1, "from": "KB", "to": "°C"}));
        let error = r.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.data.unwrap()["code"], json!("INCOMPATIBLE_UNITS"));
    }

    #[test]
    fn test_convert_mixed_params_rejected() {
        let r = call("convert", json!({"query": "1 m to ft", "value": 3}));
        let error = r.error.unwrap();
        assert_eq!(error.data.unwrap()["code"], json!("INVALID_PARAMS"));
    }

    #[test]
    fn test_convert_overflow_is_an_error() {
        let r = call("convert", json!({"value": 1e300, "from": "Tm", "to": "pm"}));
        assert!(r.result.is_none());
        let error = r.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.data.unwrap()["code"], json!("INVALID_QUANTITY"));
    }

    #[test]
    fn test_simplify_with_precision() {
        let config = Config { precision: Some(2), ..Config::default() };
        let r = handle_request(&config, &request("simplify", json!({"value": 1536, "unit": "B"})));
        let result = r.result.unwrap();
        assert_eq!(result["value"], json!(1.5));
        assert_eq!(result["display"], json!("1.50 KB"));
    }

    #[test]
    fn test_simplify_non_storage() {
        let r = call("simplify", json!({"value": 3, "unit": "km"}));
        assert_eq!(r.error.unwrap().data.unwrap()["code"], json!("NOT_SIMPLIFIABLE"));
    }

    #[test]
    fn test_to_base() {
        let r = call("to_base", json!({"value": 2, "unit": "gal"}));
        assert_eq!(r.result.unwrap()["value"], json!(1536.0));
    }

    #[test]
    fn test_compatible() {
        let r = call("compatible", json!({"a": "km", "b": "mi"}));
        assert_eq!(r.result.unwrap(), json!({"compatible": false, "convertible": true}));
    }

    #[test]
    fn test_units_list() {
        let r = call("units/list", json!({"dimension": "temperature"}));
        let units = r.result.unwrap()["units"].as_array().unwrap().clone();
        assert_eq!(units.len(), 3);
        assert_eq!(units[0]["symbol"], json!("°C"));

        let all = call("units/list", json!({}));
        assert_eq!(all.result.unwrap()["units"].as_array().unwrap().len(), UNITS.len());

        let bad = call("units/list", json!({"dimension": "mass"}));
        assert!(bad.error.is_some());
    }

    #[test]
    fn test_unknown_method() {
        let r = call("eval", json!({}));
        assert_eq!(r.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_wrong_version() {
        let mut req = request("ping", json!({}));
        req.jsonrpc = "1.0".to_string();
        let r = handle_request(&Config::default(), &req);
        assert_eq!(r.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn test_serve_lines() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#, "\n",
            "\n",
            r#"{"jsonrpc":"2.0","method":"ping"}"#, "\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":"x","method":"convert","params":{"value":0,"from":"C","to":"F"}}"#, "\n",
        );
        let mut output = Vec::new();
        serve(&Config::default(), Cursor::new(input), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<JsonValue> = text.lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], json!(1));
        assert_eq!(lines[1]["error"]["code"], json!(PARSE_ERROR));
        assert_eq!(lines[2]["id"], json!("x"));
        assert_eq!(lines[2]["result"]["value"], json!(32.0));
    }

    fn serve_lines(input: &[u8]) -> Vec<JsonValue> {
        let mut output = Vec::new();
        serve(&Config::default(), Cursor::new(input.to_vec()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_serve_invalid_request() {
        let input = concat!(
            r#"{"id":7,"method":"ping"}"#, "\n",
            r#"{"jsonrpc":"2.0","id":8}"#, "\n",
            r#"[1, 2]"#, "\n",
        );
        let lines = serve_lines(input.as_bytes());

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], json!(7));
        assert_eq!(lines[0]["error"]["code"], json!(INVALID_REQUEST));
        assert_eq!(lines[1]["id"], json!(8));
        assert_eq!(lines[1]["error"]["code"], json!(INVALID_REQUEST));
        assert_eq!(lines[2]["id"], JsonValue::Null);
        assert_eq!(lines[2]["error"]["code"], json!(INVALID_REQUEST));
    }

    #[test]
    fn test_serve_null_id_is_answered() {
        let lines = serve_lines(br#"{"jsonrpc":"2.0","id":null,"method":"ping"}
"#);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["id"], JsonValue::Null);
        assert_eq!(lines[0]["result"], json!({}));
    }

    #[test]
    fn test_serve_survives_invalid_utf8() {
        let mut input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"\xff\"}\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.push(b'\n');
        let lines = serve_lines(&input);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"]["code"], json!(PARSE_ERROR));
        assert_eq!(lines[0]["id"], JsonValue::Null);
        assert_eq!(lines[1]["id"], json!(2));
        assert_eq!(lines[1]["result"], json!({}));
    }
}
