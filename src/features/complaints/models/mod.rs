mod complaint;

pub use complaint::ComplaintRow;
