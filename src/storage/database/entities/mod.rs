/// Contact entity module
pub mod contact;
/// Product entity module
pub mod product;
/// School entity module
pub mod school;
/// Vendor entity module
pub mod vendor;

pub use contact::Entity as Contact;
pub use product::Entity as Product;
pub use school::Entity as School;
pub use vendor::Entity as Vendor;
