use crate::layout::Error;

/// Static decorations added to every event: tags and user fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    pub tags: Vec<String>,
    /// User fields in declaration order, names are unique.
    pub fields: Vec<(String, String)>,
}

impl Decorations {
    pub fn parse(tags: &str, fields: &str) -> Result<Decorations, Error> {
        let res = Decorations {
            tags: parse_tags(tags),
            fields: parse_fields(fields)?,
        };

        Ok(res)
    }
}

/// Parses comma-separated tags, skipping empty ones.
pub fn parse_tags(value: &str) -> Vec<String> {
    value.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Parses comma-separated `name:value` pairs.
///
/// Each pair is split at its first `:`, so values may contain colons themselves. A repeated name
/// keeps its first position, but takes the last value.
pub fn parse_fields(value: &str) -> Result<Vec<(String, String)>, Error> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for token in value.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (name, value) = token.split_once(':')
            .ok_or_else(|| {
                Error::ConfigInvalid(format!(r#"field "{}" must be in "name:value" form"#, token))
            })?;

        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(Error::ConfigInvalid(format!(r#"field "{}" has an empty name"#, token)));
        }

        match fields.iter_mut().find(|field| field.0 == name) {
            Some(field) => field.1 = value.to_owned(),
            None => fields.push((name.to_owned(), value.to_owned())),
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use crate::layout::Error;

    use super::*;

    fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
        fields.iter().map(|&(n, v)| (n.to_owned(), v.to_owned())).collect()
    }

    #[test]
    fn tags() {
        assert_eq!(vec!["json", "logstash"], parse_tags(" json, ,logstash,"));
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn fields() {
        assert_eq!(pairs(&[("type", "log4j"), ("shipper", "logstash")]),
            parse_fields("type:log4j,shipper:logstash").unwrap());
    }

    #[test]
    fn fields_split_at_first_colon() {
        assert_eq!(pairs(&[("url", "http://localhost:9200")]),
            parse_fields(" url : http://localhost:9200 ").unwrap());
    }

    #[test]
    fn fields_empty_value_and_tokens() {
        assert_eq!(pairs(&[("env", "")]), parse_fields(",env:,").unwrap());
        assert!(parse_fields("").unwrap().is_empty());
    }

    #[test]
    fn fields_duplicate_keeps_position_takes_last_value() {
        assert_eq!(pairs(&[("a", "3"), ("b", "2")]), parse_fields("a:1,b:2,a:3").unwrap());
    }

    #[test]
    fn fail_fields_without_colon() {
        match parse_fields("type:log4j,shipper") {
            Err(Error::ConfigInvalid(reason)) => assert!(reason.contains("shipper")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fail_fields_empty_name() {
        assert!(parse_fields(" :value").is_err());
    }

    #[test]
    fn decorations() {
        let decorations = Decorations::parse("json", "type:log4j").unwrap();

        assert_eq!(vec!["json"], decorations.tags);
        assert_eq!(pairs(&[("type", "log4j")]), decorations.fields);
    }
}
