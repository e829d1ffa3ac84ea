#[cfg(test)]
mod tests {
    use vessel_core::{Address, parse_url, take_url_param, url_hosts, url_path_name};

    #[test]
    fn addresses() {
        assert_eq!(
            Address::parse("node1", 9042).expect("Valid address"),
            Address::new("node1", 9042)
        );
        assert_eq!(
            Address::parse(" node1:9043 ", 9042).expect("Valid address"),
            Address::new("node1", 9043)
        );
        assert_eq!(
            Address::parse("[::1]:9000", 9042).expect("Valid address"),
            Address::new("::1", 9000)
        );
        assert_eq!(Address::new("::1", 9000).to_string(), "[::1]:9000");
        assert!(Address::parse(":9000", 9042).is_err());
        assert!(Address::parse("node1:port", 9042).is_err());
        assert!(Address::parse("[::1", 9042).is_err());
        assert!(Address::parse("fe80::1", 9042).is_err());
        assert!(Address::parse("fe80::1:9000", 9042).is_err());
        assert_eq!(
            Address::parse("[fe80::1]", 9042).expect("Valid address"),
            Address::new("fe80::1", 9042)
        );
    }

    #[test]
    fn urls() {
        assert!(parse_url("other://host", "store").is_err());
        let mut url = parse_url("store://main:7000/things?hosts=a,b:7001&mode=fast", "store")
            .expect("Valid url");
        assert_eq!(url_path_name(&url).as_deref(), Some("things"));
        assert_eq!(
            take_url_param(&mut url, "mode", "VESSEL_TEST_UNSET_MODE").as_deref(),
            Some("fast")
        );
        assert_eq!(
            take_url_param(&mut url, "mode", "VESSEL_TEST_UNSET_MODE"),
            None
        );
        let hosts = url_hosts(&mut url, "VESSEL_TEST_UNSET_HOSTS", 7000).expect("Valid hosts");
        assert_eq!(
            hosts,
            [
                Address::new("main", 7000),
                Address::new("a", 7000),
                Address::new("b", 7001),
            ]
        );
        assert_eq!(url.query(), None);
        let url = parse_url("store://main", "store").expect("Valid url");
        assert_eq!(url_path_name(&url), None);
    }
}
