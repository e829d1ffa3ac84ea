#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    ASC,
    DESC,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub name: String,
    pub order: Order,
}

impl Sort {
    pub fn new(name: impl Into<String>, order: Order) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, Order::ASC)
    }
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, Order::DESC)
    }
}
