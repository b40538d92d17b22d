//! JSON formatter.

use crate::scorecard::Scorecard;

/// Format a scorecard as pretty-printed JSON.
pub fn format(scorecard: &Scorecard) -> String {
    let mut output = serde_json::to_string_pretty(scorecard).unwrap_or_else(|_| "[]".to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreConfig;
    use crate::parser::parse_documents;
    use crate::score::score_documents;

    #[test]
    fn test_json_shape() {
        let yaml = "apiVersion: extensions/v1beta1\nkind: Ingress\nmetadata:\n  name: edge\n";
        let docs = parse_documents("ingress.yaml", yaml.as_bytes()).unwrap();
        let card = score_documents(&docs, &ScoreConfig::default()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&format(&card)).unwrap();
        let object = &value[0];
        assert_eq!(object["typeMeta"]["kind"], "Ingress");
        assert_eq!(object["objectMeta"]["namespace"], "default");

        let outcome = &object["outcomes"][0];
        assert_eq!(outcome["check"]["id"], "stable-version");
        assert_eq!(outcome["grade"], "Warning");
        assert_eq!(outcome["skipped"], false);
        assert_eq!(
            outcome["comments"][0]["summary"],
            "The apiVersion and kind extensions/v1beta1/Ingress is deprecated"
        );
    }
}
