//! REST client: one typed service per collection over a shared HTTP client.

mod api_client;
mod resource;
mod service;

pub use api_client::ApiClient;
pub use resource::{Resource, ResourceKind};
pub use service::{CrudApi, ResourceService};

use crate::models::{
    Article, Budget, Customer, DeliveryNote, Downtime, Family, Invoice, Machine, Operator, Order,
    Preventive, Provider, SparePart, User, WorkOrder,
};

pub type ArticleService = ResourceService<Article>;
pub type FamilyService = ResourceService<Family>;
pub type ProviderService = ResourceService<Provider>;
pub type CustomerService = ResourceService<Customer>;
pub type UserService = ResourceService<User>;
pub type MachineService = ResourceService<Machine>;
pub type SparePartService = ResourceService<SparePart>;
pub type WorkOrderService = ResourceService<WorkOrder>;
pub type OperatorService = ResourceService<Operator>;
pub type PreventiveService = ResourceService<Preventive>;
pub type DowntimeService = ResourceService<Downtime>;
pub type OrderService = ResourceService<Order>;
pub type BudgetService = ResourceService<Budget>;
pub type InvoiceService = ResourceService<Invoice>;
pub type DeliveryNoteService = ResourceService<DeliveryNote>;
