/// Per-round pairwise damage, queried at kill time for the attacker's total
/// work done on the victim. Self and same-side damage never enters this map.
#[derive(Debug, Default)]
pub struct DamageAttribution {
    dealt: std::collections::HashMap<(i32, i32), i32>,
}

impl DamageAttribution {
    pub fn record(&mut self, attacker: i32, victim: i32, amount: i32) {
        *self.dealt.entry((attacker, victim)).or_default() += amount;
    }

    pub fn total(&self, attacker: i32, victim: i32) -> i32 {
        self.dealt.get(&(attacker, victim)).copied().unwrap_or(0)
    }
}
