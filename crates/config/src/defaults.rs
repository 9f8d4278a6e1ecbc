pub fn default_service_name() -> String {
    "pulse".to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_spot_base() -> String {
    "https://api.binance.com".to_string()
}

pub fn default_futures_base() -> String {
    "https://fapi.binance.com".to_string()
}

pub fn default_coingecko_base() -> String {
    "https://api.coingecko.com".to_string()
}

pub fn default_feargreed_base() -> String {
    "https://api.alternative.me".to_string()
}

pub fn default_fetch_attempts() -> u32 {
    3
}

pub fn default_retry_delay_ms() -> u64 {
    400
}

pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    8080
}
