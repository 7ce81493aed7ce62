//! Literal per-scheme coefficients (`spec.md` §4.1, §6). Exact literals are required for
//! bit-reproducibility with the upstream scheme tables, so these are written out rather than
//! derived from fractions at compile time.
use super::{CflLimit, IntegratorDescriptor, StageWeights};

const ZERO: StageWeights = StageWeights { delta: 0.0, gamma1: 0.0, gamma2: 0.0, gamma3: 0.0, beta: 0.0 };

const ONE_THIRD: f64 = 0.333_333_333_333_333_3;
const TWO_THIRDS: f64 = 0.666_666_666_666_666_6;

pub const RK1: IntegratorDescriptor = IntegratorDescriptor {
    name: "rk1",
    nstages: 1,
    cfl_limit: CflLimit::Flat(1.0),
    stages: [
        StageWeights { delta: 1.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 1.0 },
        ZERO,
        ZERO,
        ZERO,
        ZERO,
    ],
};

pub const VL2: IntegratorDescriptor = IntegratorDescriptor {
    name: "vl2",
    nstages: 2,
    cfl_limit: CflLimit::ByDimension { one_d: 1.0, two_d: 0.5, three_d: ONE_THIRD },
    stages: [
        StageWeights { delta: 1.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 0.5 },
        StageWeights { delta: 0.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 1.0 },
        ZERO,
        ZERO,
        ZERO,
    ],
};

pub const RK2: IntegratorDescriptor = IntegratorDescriptor {
    name: "rk2",
    nstages: 2,
    cfl_limit: CflLimit::Flat(1.0),
    stages: [
        StageWeights { delta: 1.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 1.0 },
        StageWeights { delta: 0.0, gamma1: 0.5, gamma2: 0.5, gamma3: 0.0, beta: 0.5 },
        ZERO,
        ZERO,
        ZERO,
    ],
};

pub const RK3: IntegratorDescriptor = IntegratorDescriptor {
    name: "rk3",
    nstages: 3,
    cfl_limit: CflLimit::Flat(1.0),
    stages: [
        StageWeights { delta: 1.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 1.0 },
        StageWeights { delta: 0.0, gamma1: 0.25, gamma2: 0.75, gamma3: 0.0, beta: 0.25 },
        StageWeights { delta: 0.0, gamma1: TWO_THIRDS, gamma2: ONE_THIRD, gamma3: 0.0, beta: TWO_THIRDS },
        ZERO,
        ZERO,
    ],
};

/// Ketcheson (2010) Table 2 coefficients, RK4(4)[2S].
pub const RK4: IntegratorDescriptor = IntegratorDescriptor {
    name: "rk4",
    nstages: 4,
    cfl_limit: CflLimit::Flat(1.3925),
    stages: [
        StageWeights { delta: 1.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 1.193_743_905_974_738 },
        StageWeights {
            delta: 0.217_683_334_308_543,
            gamma1: 0.121_098_479_554_482,
            gamma2: 0.721_781_678_111_411,
            gamma3: 0.0,
            beta: 0.099_279_895_495_783,
        },
        StageWeights {
            delta: 1.065_841_341_361_089,
            gamma1: -3.843_833_699_660_025,
            gamma2: 2.121_209_265_338_722,
            gamma3: 0.0,
            beta: 1.131_678_018_054_042,
        },
        StageWeights {
            delta: 0.0,
            gamma1: 0.546_370_891_121_863,
            gamma2: 0.198_653_035_682_705,
            gamma3: 0.0,
            beta: 0.310_665_766_509_336,
        },
        ZERO,
    ],
};

/// Gottlieb (2009) coefficients, SSPRK(5,4). Stage 4 triggers the penultimate hack
/// (`spec.md` §4.1, §6); the hack's own coefficient (`0.063_692_468_666_290`) is kept local to
/// [`crate::physics::integrate`] per Design Notes §9 rather than stored here.
pub const SSPRK5_4: IntegratorDescriptor = IntegratorDescriptor {
    name: "ssprk5_4",
    nstages: 5,
    cfl_limit: CflLimit::Flat(1.3925),
    stages: [
        StageWeights { delta: 1.0, gamma1: 0.0, gamma2: 1.0, gamma3: 0.0, beta: 0.391_752_226_571_890 },
        StageWeights {
            delta: 0.0,
            gamma1: 0.555_629_506_348_765,
            gamma2: 0.444_370_493_651_235,
            gamma3: 0.0,
            beta: 0.368_410_593_050_371,
        },
        StageWeights {
            delta: 0.517_231_671_970_585,
            gamma1: 0.379_898_148_511_597,
            gamma2: 0.0,
            gamma3: 0.620_101_851_488_403,
            beta: 0.251_891_774_271_694,
        },
        StageWeights {
            delta: 0.096_059_710_526_147,
            gamma1: 0.821_920_045_606_868,
            gamma2: 0.0,
            gamma3: 0.178_079_954_393_132,
            beta: 0.544_974_750_228_521,
        },
        StageWeights {
            delta: 0.0,
            gamma1: 0.386_708_617_503_268,
            gamma2: 1.0,
            gamma3: 1.0,
            beta: 0.226_007_483_236_906,
        },
    ],
};
