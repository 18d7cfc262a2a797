use once_cell::sync::OnceCell;

use crate::logging;

pub mod http;
pub mod text;

static CRYPTO_PROVIDER: OnceCell<()> = OnceCell::new();

/// 安裝 rustls 使用的 ring 加密提供者，整個程序只執行一次
pub fn ensure_rustls_crypto_provider() {
    CRYPTO_PROVIDER.get_or_init(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            logging::warn_file_async("rustls crypto provider was already installed".to_string());
        }
    });
}
