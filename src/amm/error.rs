//! Erro unificado do pool: código estável + contexto estruturado, com
//! renderização determinística para UI e para logs em JSON.
use core::fmt;
use std::collections::BTreeMap;

use crate::amm::error_catalog::{default_locale_message, AmmErrorCode};

/// Limite de tamanho de cada valor de contexto, após sanitização.
const MAX_CONTEXT_LEN: usize = 256;

/// Troca quebras de linha/tabs por espaço e trunca valores longos.
fn clean_value(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect();
    if out.chars().count() >= MAX_CONTEXT_LEN {
        out = out.chars().take(MAX_CONTEXT_LEN - 1).collect();
        out.push('…');
    }
    out
}

fn push_json_escaped(dst: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => dst.push_str("\\\""),
            '\\' => dst.push_str("\\\\"),
            '\n' => dst.push_str("\\n"),
            '\r' => dst.push_str("\\r"),
            '\t' => dst.push_str("\\t"),
            c if c.is_control() => {
                use core::fmt::Write as _;
                let _ = write!(dst, "\\u{:04x}", c as u32);
            }
            c => dst.push(c),
        }
    }
}

/// Substitui placeholders `{chave}` presentes no contexto; placeholders
/// desconhecidos (ou vazios) ficam como estão.
fn render_template(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        rest = &rest[open + 1..];
        match rest.find('}') {
            Some(close) => {
                let key = &rest[..close];
                match context.get(key) {
                    Some(value) if !key.is_empty() => out.push_str(value),
                    _ => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &rest[close + 1..];
            }
            None => {
                // '{' sem fechamento: preserva literal
                out.push('{');
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Erro do pool com contexto estruturado.
#[derive(Debug, Clone)]
pub struct AmmError {
    pub code: AmmErrorCode,
    pub context: BTreeMap<String, String>,
}

impl AmmError {
    /// Cria um novo erro sem contexto adicional.
    pub fn new(code: AmmErrorCode) -> Self {
        Self {
            code,
            context: BTreeMap::new(),
        }
    }

    /// Adiciona um par chave/valor ao contexto.
    pub fn with_context<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key = key.into();
        if !key.is_empty() {
            self.context.insert(key, clean_value(&value.to_string()));
        }
        self
    }

    fn resolved_message(&self) -> String {
        render_template(default_locale_message(self.code), &self.context)
    }

    /// Mensagem curta para UI.
    pub fn to_user_string(&self) -> String {
        format!("[{}] {}", self.code.code(), self.resolved_message())
    }

    /// Renderiza um template arbitrário usando o contexto atual.
    pub fn render_with_template(&self, template: &str) -> String {
        render_template(template, &self.context)
    }

    /// Serialização estável em JSON para logs.
    pub fn to_log_json(&self) -> String {
        let mut json = String::from("{\"code\":\"");
        push_json_escaped(&mut json, self.code.code());
        json.push_str("\",\"title\":\"");
        push_json_escaped(&mut json, self.code.title());
        json.push_str("\",\"message\":\"");
        push_json_escaped(&mut json, &self.resolved_message());
        json.push_str("\",\"context\":{");
        for (i, (key, value)) in self.context.iter().enumerate() {
            if i > 0 {
                json.push(',');
            }
            json.push('"');
            push_json_escaped(&mut json, key);
            json.push_str("\":\"");
            push_json_escaped(&mut json, value);
            json.push('"');
        }
        json.push_str("}}");
        json
    }
}

impl fmt::Display for AmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_user_string())
    }
}

impl std::error::Error for AmmError {}

/// Resultado padrão para operações do pool.
pub type Result<T> = std::result::Result<T, AmmError>;

#[macro_export]
macro_rules! amm_err {
  ($code:expr) => {{
    $crate::amm::error::AmmError::new($code)
  }};
  ($code:expr, $($key:ident => $value:expr),+ $(,)?) => {{
    let mut err = $crate::amm::error::AmmError::new($code);
    $(
      err = err.with_context(stringify!($key), $value);
    )+
    err
  }};
  ($code:expr, $($key:expr => $value:expr),+ $(,)?) => {{
    let mut err = $crate::amm::error::AmmError::new($code);
    $(
      err = err.with_context($key, $value);
    )+
    err
  }};
}

#[macro_export]
macro_rules! amm_bail {
  ($($tt:tt)*) => {
    return Err($crate::amm_err!($($tt)*));
  };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_string_basic() {
        let err = AmmError::new(AmmErrorCode::ZeroAmount);
        assert_eq!(err.to_user_string(), "[AMM-0001] amount deve ser > 0");
    }

    #[test]
    fn placeholder_subst() {
        let err = AmmError::new(AmmErrorCode::OverflowNumeric).with_context("detalhe", "valor");
        assert_eq!(err.render_with_template("falha {detalhe}"), "falha valor");
    }

    #[test]
    fn unclosed_brace_is_preserved() {
        let err = AmmError::new(AmmErrorCode::ZeroAmount);
        assert_eq!(err.render_with_template("abre {sem fim"), "abre {sem fim");
    }

    #[test]
    fn log_json_shape() {
        let err = AmmError::new(AmmErrorCode::NotInitialized).with_context("op", "swap");
        let json = err.to_log_json();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"code\":"));
        assert!(json.contains("\"title\":"));
        assert!(json.contains("\"message\":"));
        assert!(json.contains("\"context\":{\"op\":\"swap\"}"));
    }

    #[test]
    fn macros_variants() {
        let err = amm_err!(AmmErrorCode::ZeroAmount, amount => 0);
        assert_eq!(err.code, AmmErrorCode::ZeroAmount);
        assert_eq!(err.context.get("amount").unwrap(), "0");

        let err_expr = amm_err!(AmmErrorCode::UnknownAsset, "token" => 7);
        assert_eq!(err_expr.code, AmmErrorCode::UnknownAsset);
        assert_eq!(err_expr.context.get("token").unwrap(), "7");
    }
}
