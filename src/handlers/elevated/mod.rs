// handlers/elevated - super-admin only. The router stacks
// super_admin_middleware behind jwt_auth_middleware for this tier.
pub mod admins;
pub mod departments;
