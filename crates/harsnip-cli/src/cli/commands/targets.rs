//! `harsnip targets` – list targets and clients.

use anyhow::Result;
use harsnip_core::targets::AvailableTarget;
use harsnip_core::TargetRegistry;

pub fn run_targets(json: bool) -> Result<()> {
    let available = TargetRegistry::with_builtins().available_targets();
    if json {
        println!("{}", serde_json::to_string_pretty(&available)?);
    } else {
        print!("{}", format_targets(&available));
    }
    Ok(())
}

fn format_targets(available: &[AvailableTarget]) -> String {
    let mut out = String::new();
    for target in available {
        out.push_str(&format!(
            "{} ({}, {}) default client: {}\n",
            target.info.key, target.info.title, target.info.extname, target.info.default
        ));
        for client in target.clients.iter().flatten() {
            out.push_str(&format!("  {:<12} {}", client.key.as_str(), client.title));
            if let Some(link) = &client.link {
                out.push_str(&format!(" <{}>", link));
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_lists_builtins_with_clients() {
        let text = format_targets(&TargetRegistry::with_builtins().available_targets());
        assert!(text.starts_with("java (Java, .java) default client: okhttp\n"));
        assert!(text.contains("  okhttp       OkHttp <http://square.github.io/okhttp/>\n"));
        assert!(text.contains("rapidql (RapidQL, .js) default client: rapidql\n"));
    }
}
