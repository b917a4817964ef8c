//! Network address provider

use super::command::{command_output, QueryError};
use super::MetricProvider;
use std::process::Command;

/// Reports the host's primary IPv4 address via `ip addr`.
///
/// The first `inet` entry is the loopback address, so the second one is
/// taken. A host with no other address yields an empty string, which is
/// drawn as-is.
pub struct NetworkSource;

impl MetricProvider for NetworkSource {
    fn name(&self) -> &'static str {
        "network"
    }

    fn sample(&self) -> Result<String, QueryError> {
        let output = command_output("ip addr", Command::new("ip").arg("addr"))?;
        Ok(parse_ip_addr(&output))
    }
}

fn parse_ip_addr(output: &str) -> String {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("inet") => fields.next(),
                _ => None,
            }
        })
        .nth(1)
        .map(|cidr| cidr.split('/').next().unwrap_or(cidr).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_ADDR_OUTPUT: &str = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN group default qlen 1000
    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00
    inet 127.0.0.1/8 scope host lo
       valid_lft forever preferred_lft forever
    inet6 ::1/128 scope host
       valid_lft forever preferred_lft forever
2: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP group default qlen 1000
    link/ether b8:27:eb:00:00:01 brd ff:ff:ff:ff:ff:ff
    inet 192.168.1.42/24 brd 192.168.1.255 scope global dynamic noprefixroute wlan0
       valid_lft 86030sec preferred_lft 86030sec
    inet6 fe80::1/64 scope link
       valid_lft forever preferred_lft forever
";

    #[test]
    fn test_second_inet_entry_without_prefix() {
        assert_eq!(parse_ip_addr(IP_ADDR_OUTPUT), "192.168.1.42");
    }

    #[test]
    fn test_no_second_inet_entry_yields_empty_string() {
        let loopback_only = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536
    inet 127.0.0.1/8 scope host lo
    inet6 ::1/128 scope host
";
        assert_eq!(parse_ip_addr(loopback_only), "");
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(parse_ip_addr(""), "");
    }
}
