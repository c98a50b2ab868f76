// ==========================================
// 销售业绩导入系统 - 管理员模式
// ==========================================
// 职责: 共享 PIN 校验，进入 / 退出管理员模式
// 红线: PIN 错误时绝不进入管理员模式
// ==========================================

use tracing::{info, warn};

/// 管理员会话状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    active: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 使用 PIN 进入管理员模式
    ///
    /// # 参数
    /// - `supplied`: 用户输入
    /// - `expected`: 配置中的 PIN
    ///
    /// # 返回
    /// 是否处于管理员模式
    pub fn login(&mut self, supplied: &str, expected: &str) -> bool {
        if !expected.is_empty() && supplied == expected {
            info!("管理员模式已开启");
            self.active = true;
        } else {
            warn!("管理员 PIN 校验失败");
        }
        self.active
    }

    pub fn logout(&mut self) {
        if self.active {
            info!("管理员模式已关闭");
        }
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_pin_never_enables_admin() {
        let mut session = AdminSession::new();
        assert!(!session.login("787", "786"));
        assert!(!session.login("", "786"));
        assert!(!session.login("", ""));
        assert!(!session.login(" 786 ", "786"));
        assert!(!session.is_active());
    }

    #[test]
    fn test_login_logout() {
        let mut session = AdminSession::new();
        assert!(session.login("786", "786"));
        assert!(session.is_active());
        session.logout();
        assert!(!session.is_active());
    }
}
