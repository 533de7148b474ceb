use shared::{format_rupiah, FeeClass, FeeClassView};

pub struct FeeClassMapper;

impl FeeClassMapper {
    pub fn to_view(class: FeeClass) -> FeeClassView {
        FeeClassView {
            id: class.id,
            kind: class.kind,
            name: class.name,
            monthly: format_rupiah(class.monthly),
            term_label: class.kind.term_label().to_string(),
            term_amount: format_rupiah(class.term_amount),
            raw_monthly: class.monthly,
            raw_term_amount: class.term_amount,
        }
    }
}
